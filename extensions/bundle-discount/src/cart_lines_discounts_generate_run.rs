use shopify_function::prelude::*;
use shopify_function::Result;
use tracing::debug;

use crate::bundle::{self, BundleRole, DiscountOperation, LineItem, SelectionStrategy};
use crate::config::BundleConfig;
use crate::schema;
use crate::schema::cart_lines_discounts_generate_run::input::cart::lines::Merchandise;

#[shopify_function]
fn cart_lines_discounts_generate_run(
    input: schema::cart_lines_discounts_generate_run::Input,
) -> Result<schema::CartLinesDiscountsGenerateRunResult> {
    // 1. Resolve the discount configuration, falling back to the defaults
    let config = BundleConfig::from_metafield(
        input
            .discount()
            .metafield()
            .map(|metafield| metafield.value().as_str()),
    );

    // 2. Map cart lines to bundle roles
    let lines = line_items(&input);
    debug!(lines = lines.len(), "evaluating cart");

    // 3. Allocate and convert to cart operations
    let operations = bundle::allocate(&lines, &config)
        .into_iter()
        .map(to_cart_operation)
        .collect();

    Ok(schema::CartLinesDiscountsGenerateRunResult { operations })
}

// Non-product merchandise stays in the list as `BundleRole::None` so cart order holds.
fn line_items(input: &schema::cart_lines_discounts_generate_run::Input) -> Vec<LineItem> {
    input
        .cart()
        .lines()
        .iter()
        .map(|line| {
            let role = match line.merchandise() {
                Merchandise::ProductVariant(variant) => BundleRole::from_tag(
                    variant
                        .product()
                        .bundle_role()
                        .map(|metafield| metafield.value().as_str()),
                ),
                _ => BundleRole::None,
            };
            // Negative quantities break the cart contract; treat them as empty.
            let quantity = u64::try_from(line.quantity().to_owned()).unwrap_or(0);
            LineItem::new(line.id().clone(), quantity, role)
        })
        .collect()
}

fn to_cart_operation(operation: DiscountOperation) -> schema::CartOperation {
    let targets = operation
        .targets
        .into_iter()
        .map(|target| {
            schema::ProductDiscountCandidateTarget::CartLine(schema::CartLineTarget {
                id: target.line_id,
                // Claims never exceed the line quantity, which came in as an i32.
                quantity: Some(i32::try_from(target.quantity).unwrap_or(i32::MAX)),
            })
        })
        .collect();

    let selection_strategy = match operation.selection_strategy {
        SelectionStrategy::First => schema::ProductDiscountSelectionStrategy::First,
    };

    schema::CartOperation::ProductDiscountsAdd(schema::ProductDiscountsAddOperation {
        selection_strategy,
        candidates: vec![schema::ProductDiscountCandidate {
            targets,
            message: Some(operation.message),
            value: schema::ProductDiscountCandidateValue::Percentage(schema::Percentage {
                value: Decimal(operation.percentage),
            }),
            associated_discount_code: None,
        }],
    })
}
