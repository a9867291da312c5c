//! Search criteria: user-facing search inputs and the filters built from them.

mod builder;
mod filter;

pub use builder::{
    build_filter, split_list, SearchInput, FIELD_CUISINE_NAME, FIELD_INGREDIENT_NAMES,
    FIELD_NAME, FIELD_TAG_NAMES,
};
pub use filter::{Condition, Filter, Pattern};
