//! Side-by-side comparison of the selected characters.
//!
//! [`compare`] produces the aggregate [`ComparisonResult`]. [`ComparisonTable`]
//! and [`CharacterCard`] are the display-ready table and grid views. All of
//! them are pure functions of the selection.

mod card;
mod engine;
mod table;

pub use card::{CharacterCard, SkillLine, StatBar};
pub use engine::{
    compare, overall_rating, round_half_up, CharacterSummary, ComparisonResult, StatComparison,
    StatEntry,
};
pub use table::{
    Attribute, AttributeGroup, AttributeGroupKind, AttributeRow, CellValue, ComparisonTable,
    TableColumn, NOT_AVAILABLE,
};
