use serde::{Deserialize, Serialize};

/// One normalized ingredient line.
///
/// `checked` belongs to the UI; extraction always leaves it `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub checked: bool,
    pub ingredient: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl IngredientRow {
    pub fn new(ingredient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            checked: false,
            ingredient: ingredient.into(),
            amount: amount.into(),
            other: None,
        }
    }
}

/// A (name, quantity) pair exactly as a site adapter read it from markup.
/// Either side may be empty when the markup did not provide it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPair {
    pub name: String,
    pub amount: String,
}

impl RawPair {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}
