use std::process;

use shopify_function::prelude::*;

mod bundle;
mod cart_lines_discounts_generate_run;
mod config;
mod error;

#[typegen("schema.graphql")]
pub mod schema {
    #[query("src/run.graphql")]
    pub mod cart_lines_discounts_generate_run {}
}

fn main() {
    std::eprintln!("Please invoke a named export.");
    process::abort();
}
