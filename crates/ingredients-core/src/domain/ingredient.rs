//! Ingredient Entity
//!
//! One line of a recipe or dish: an article, a quantity in some unit and a
//! free-text comment, filed either as a normal or a prepared ingredient.

use serde::{Deserialize, Serialize};

/// Which of the two ingredient lists an ingredient belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preparation {
    /// Used as delivered
    #[default]
    Normal,
    /// Has to be prepared beforehand
    Prepared,
}

impl Preparation {
    pub fn from_flag(prepared: bool) -> Self {
        if prepared {
            Preparation::Prepared
        } else {
            Preparation::Normal
        }
    }

    pub fn is_prepared(self) -> bool {
        self == Preparation::Prepared
    }

    /// The other list
    pub fn toggled(self) -> Self {
        match self {
            Preparation::Normal => Preparation::Prepared,
            Preparation::Prepared => Preparation::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preparation::Normal => "normal",
            Preparation::Prepared => "prepared",
        }
    }
}

/// Measuring unit. Shared reference data, never edited by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub short_name: String,
    pub long_name: String,
}

impl Unit {
    /// Option label shown in the unit select, e.g. `g (gram)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.short_name, self.long_name)
    }
}

/// The article an ingredient refers to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// An ingredient line
///
/// `position` is 1-based and dense within the list named by `preparation`.
/// Only `IngredientLists` assigns positions and preparations.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    /// Unique within a project
    pub id: u32,
    /// Position within its list
    pub position: u32,
    /// Owning list
    pub preparation: Preparation,
    pub article: Article,
    /// Quantity, expressed in `current_unit`
    pub value: f64,
    pub current_unit: Unit,
    /// Units the user may pick from
    pub units: Vec<Unit>,
    pub comment: String,
    /// Transient UI flag, never persisted
    pub being_dragged: bool,
}

impl Ingredient {
    /// Create an ingredient that is not yet placed in a list
    pub fn new(id: u32, article: Article, value: f64, current_unit: Unit, units: Vec<Unit>) -> Self {
        Self {
            id,
            position: 0,
            preparation: Preparation::Normal,
            article,
            value,
            current_unit,
            units,
            comment: String::new(),
            being_dragged: false,
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.preparation.is_prepared()
    }

    /// Look up one of the selectable units
    pub fn unit(&self, unit_id: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    /// Apply a field patch
    pub fn apply(&mut self, patch: &IngredientPatch) {
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(unit) = &patch.current_unit {
            self.current_unit = unit.clone();
        }
        if let Some(comment) = &patch.comment {
            self.comment = comment.clone();
        }
        if let Some(flag) = patch.being_dragged {
            self.being_dragged = flag;
        }
    }

    /// Same persisted data, ignoring the transient drag flag
    pub fn same_record(&self, other: &Ingredient) -> bool {
        self.id == other.id
            && self.position == other.position
            && self.preparation == other.preparation
            && self.article == other.article
            && self.value == other.value
            && self.current_unit == other.current_unit
            && self.units == other.units
            && self.comment == other.comment
    }
}

/// Data-only changes an edit may carry.
///
/// Position and preparation are absent: those only change
/// through the structural operations of `IngredientLists`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngredientPatch {
    pub value: Option<f64>,
    pub current_unit: Option<Unit>,
    pub comment: Option<String>,
    pub being_dragged: Option<bool>,
}

impl IngredientPatch {
    pub fn value(value: f64) -> Self {
        Self { value: Some(value), ..Default::default() }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        Self { comment: Some(comment.into()), ..Default::default() }
    }

    pub fn unit(unit: Unit) -> Self {
        Self { current_unit: Some(unit), ..Default::default() }
    }

    pub fn being_dragged(flag: bool) -> Self {
        Self { being_dragged: Some(flag), ..Default::default() }
    }

    /// True when the patch touches something the backend stores
    pub fn is_persistent(&self) -> bool {
        self.value.is_some()
            || self.current_unit.is_some()
            || self.comment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gram() -> Unit {
        Unit { id: 1, short_name: "g".to_string(), long_name: "gram".to_string() }
    }

    fn kilo() -> Unit {
        Unit { id: 2, short_name: "kg".to_string(), long_name: "kilogram".to_string() }
    }

    #[test]
    fn test_ingredient_creation() {
        let article = Article { name: "Flour".to_string(), comment: String::new() };
        let ingr = Ingredient::new(7, article, 250.0, gram(), vec![gram(), kilo()]);
        assert_eq!(ingr.id, 7);
        assert_eq!(ingr.preparation, Preparation::Normal);
        assert!(!ingr.being_dragged);
        assert_eq!(ingr.unit(2), Some(&kilo()));
        assert_eq!(ingr.unit(3), None);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut ingr = Ingredient::new(1, Article::default(), 1.0, gram(), vec![gram()]);
        ingr.comment = "sifted".to_string();
        ingr.apply(&IngredientPatch::value(5.0));
        assert_eq!(ingr.value, 5.0);
        assert_eq!(ingr.comment, "sifted");
        assert_eq!(ingr.current_unit, gram());
    }

    #[test]
    fn test_drag_flag_is_not_persistent() {
        assert!(!IngredientPatch::being_dragged(true).is_persistent());
        assert!(IngredientPatch::comment("x").is_persistent());
    }

    #[test]
    fn test_same_record_ignores_drag_flag() {
        let a = Ingredient::new(1, Article::default(), 1.0, gram(), vec![gram()]);
        let mut b = a.clone();
        b.being_dragged = true;
        assert!(a.same_record(&b));
        b.value = 2.0;
        assert!(!a.same_record(&b));
    }

    #[test]
    fn test_preparation_helpers() {
        assert_eq!(Preparation::from_flag(true), Preparation::Prepared);
        assert_eq!(Preparation::Normal.toggled(), Preparation::Prepared);
        assert_eq!(kilo().label(), "kg (kilogram)");
    }
}
