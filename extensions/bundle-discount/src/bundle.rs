use tracing::debug;

use crate::config::BundleConfig;

pub const CORES_PER_BUNDLE: u64 = 1;

// Role of a cart line, read from the product's `custom.bundle_role` metafield.
// `None` covers a missing tag, any other value, and non-product merchandise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleRole {
    Core,
    Patch,
    None,
}

impl BundleRole {
    pub const CORE_TAG: &'static str = "core";
    pub const PATCH_TAG: &'static str = "patch";

    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(Self::CORE_TAG) => Self::Core,
            Some(Self::PATCH_TAG) => Self::Patch,
            _ => Self::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub id: String,
    pub quantity: u64,
    pub role: BundleRole,
}

impl LineItem {
    pub fn new(id: impl Into<String>, quantity: u64, role: BundleRole) -> Self {
        Self {
            id: id.into(),
            quantity,
            role,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscountTarget {
    pub line_id: String,
    pub quantity: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionStrategy {
    First,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiscountOperation {
    pub message: String,
    pub percentage: f64,
    pub selection_strategy: SelectionStrategy,
    pub targets: Vec<DiscountTarget>,
}

pub fn bundle_count(core_total: u64, patch_total: u64, patches_per_bundle: u64) -> u64 {
    let patch_sets = patch_total.checked_div(patches_per_bundle).unwrap_or(0);
    (core_total / CORES_PER_BUNDLE).min(patch_sets)
}

/// e.g. `Bundle 20% Off (2 bundles)`
pub fn bundle_message(percentage: f64, bundles: u64) -> String {
    let label = if bundles == 1 {
        "1 bundle".to_string()
    } else {
        format!("{bundles} bundles")
    };
    format!("Bundle {percentage}% Off ({label})")
}

/// Returns no operation when the cart holds no complete bundle, otherwise
/// exactly one whose targets list core lines first, then patch lines.
pub fn allocate(lines: &[LineItem], config: &BundleConfig) -> Vec<DiscountOperation> {
    if lines.is_empty() {
        return vec![];
    }

    // 1. Split by role, keeping cart order; untagged lines drop out
    let (core_lines, patch_lines): (Vec<&LineItem>, Vec<&LineItem>) = lines
        .iter()
        .filter(|line| line.role != BundleRole::None)
        .partition(|line| line.role == BundleRole::Core);

    // 2. Count complete bundles
    let core_total = total_quantity(&core_lines);
    let patch_total = total_quantity(&patch_lines);
    let patches_per_bundle = u64::from(config.patches_per_bundle);
    let bundles = bundle_count(core_total, patch_total, patches_per_bundle);

    debug!(
        core_total,
        patch_total,
        bundle_count = bundles,
        "aggregated bundle roles"
    );

    if bundles == 0 {
        return vec![];
    }

    // 3. Claim units; bundles * patches_per_bundle <= patch_total, so no overflow
    let mut targets = claim(&core_lines, bundles * CORES_PER_BUNDLE);
    targets.extend(claim(&patch_lines, bundles * patches_per_bundle));

    vec![DiscountOperation {
        message: bundle_message(config.percentage, bundles),
        percentage: config.percentage,
        selection_strategy: SelectionStrategy::First,
        targets,
    }]
}

fn total_quantity(lines: &[&LineItem]) -> u64 {
    lines
        .iter()
        .map(|line| line.quantity)
        .fold(0, u64::saturating_add)
}

// First-fit: earlier lines are saturated before later ones.
fn claim(lines: &[&LineItem], mut remaining: u64) -> Vec<DiscountTarget> {
    let mut targets = Vec::new();
    for line in lines {
        if remaining == 0 {
            break;
        }
        let quantity = line.quantity.min(remaining);
        if quantity == 0 {
            continue;
        }
        debug!(line_id = %line.id, role = ?line.role, quantity, "claimed line");
        targets.push(DiscountTarget {
            line_id: line.id.clone(),
            quantity,
        });
        remaining -= quantity;
    }
    targets
}
