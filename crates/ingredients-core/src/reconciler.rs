//! Ingredient List Reconciler
//!
//! Keeps the normal and prepared ingredient lists consistent while items
//! are reordered, moved between the lists, added and removed.
//!
//! Both lists live in one vector of tagged ingredients; the two lists are
//! views filtered by `Preparation`. After every structural change the
//! positions of each list are reindexed to be sequential (1, 2, 3, ...).

use crate::domain::{EditorError, EditorResult, Ingredient, IngredientPatch, Preparation, Unit};
use crate::util;

/// First position of a list
pub const FIRST_POSITION: u32 = 1;

/// The normal and prepared ingredient lists of one recipe or dish
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientLists {
    /// Sorted by (preparation, position)
    items: Vec<Ingredient>,
}

impl IngredientLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from fetched ingredients.
    ///
    /// Order inside each list follows the stored positions (ties broken by id),
    /// then positions are reindexed. Repeated ids keep their first occurrence.
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let mut items: Vec<Ingredient> = Vec::new();
        for mut ingr in ingredients {
            if util::contains(&items, |i: &Ingredient| i.id == ingr.id) {
                log::warn!("[LISTS] Dropping duplicate ingredient {}", ingr.id);
                continue;
            }
            ingr.being_dragged = false;
            items.push(ingr);
        }
        let mut lists = Self { items };
        lists.reindex();
        lists
    }

    // ========================
    // Queries
    // ========================

    /// One list, in position order
    pub fn list(&self, preparation: Preparation) -> Vec<&Ingredient> {
        self.items.iter().filter(|i| i.preparation == preparation).collect()
    }

    pub fn normal(&self) -> Vec<&Ingredient> {
        self.list(Preparation::Normal)
    }

    pub fn prepared(&self) -> Vec<&Ingredient> {
        self.list(Preparation::Prepared)
    }

    /// Normal list first, then prepared
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.items.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Ingredient> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Which list holds `id`
    pub fn locate(&self, id: u32) -> Option<Preparation> {
        self.get(id).map(|i| i.preparation)
    }

    pub fn contains(&self, id: u32) -> bool {
        util::contains(&self.items, |i: &Ingredient| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of ingredients in one list
    pub fn list_len(&self, preparation: Preparation) -> usize {
        self.items.iter().filter(|i| i.preparation == preparation).count()
    }

    /// Every selectable unit seen on any ingredient, first occurrence wins
    pub fn known_units(&self) -> Vec<Unit> {
        let mut units: Vec<Unit> = Vec::new();
        for unit in self.items.iter().flat_map(|i| i.units.iter()) {
            if !util::contains(&units, |u: &Unit| u.id == unit.id) {
                units.push(unit.clone());
            }
        }
        units
    }

    // ========================
    // Structural operations
    // ========================

    /// Swap the positions of two ingredients of the same list
    pub fn move_within_same_list(&mut self, source_id: u32, target_id: u32) -> EditorResult<()> {
        let source = self.index_of(source_id)?;
        let target = self.index_of(target_id)?;
        if source == target {
            return Ok(());
        }

        let preparation = self.items[source].preparation;
        if self.items[target].preparation != preparation {
            return Err(EditorError::InvalidState(format!(
                "ingredients {} and {} are in different lists",
                source_id, target_id
            )));
        }

        let source_position = self.items[source].position;
        self.items[source].position = self.items[target].position;
        self.items[target].position = source_position;
        self.items[source].preparation = preparation;
        self.items[target].preparation = preparation;

        log::debug!(
            "[LISTS] Swapped {} and {} in {} list",
            source_id,
            target_id,
            preparation.as_str()
        );
        self.reindex();
        Ok(())
    }

    /// Move an ingredient into the other list, in front of `target_id`
    pub fn move_across_lists(&mut self, source_id: u32, target_id: u32) -> EditorResult<()> {
        let source = self.index_of(source_id)?;
        let target = self.index_of(target_id)?;

        let destination = self.items[target].preparation;
        if self.items[source].preparation == destination {
            return Err(EditorError::InvalidState(format!(
                "ingredients {} and {} are both in the {} list",
                source_id,
                target_id,
                destination.as_str()
            )));
        }
        let target_position = self.items[target].position;

        let mut moved = self.items.remove(source);
        for ingr in self.items.iter_mut() {
            if ingr.preparation == destination && ingr.position >= target_position {
                ingr.position += 1;
            }
        }
        moved.position = target_position;
        moved.preparation = destination;
        self.items.push(moved);

        log::debug!(
            "[LISTS] Moved {} into {} list at position {}",
            source_id,
            destination.as_str(),
            target_position
        );
        self.reindex();
        Ok(())
    }

    /// Move `source_id` onto `target_id`, swapping within a list or
    /// inserting across lists
    pub fn move_ingredient(&mut self, source_id: u32, target_id: u32) -> EditorResult<()> {
        let from = self.locate(source_id).ok_or(EditorError::NotFound(source_id))?;
        let to = self.locate(target_id).ok_or(EditorError::NotFound(target_id))?;
        if from == to {
            self.move_within_same_list(source_id, target_id)
        } else {
            self.move_across_lists(source_id, target_id)
        }
    }

    /// Put `ingredient` at the end of a list, taking it out of wherever it was
    pub fn append(&mut self, preparation: Preparation, mut ingredient: Ingredient) {
        self.detach(ingredient.id);
        ingredient.position = self.list_len(preparation) as u32 + 1;
        ingredient.preparation = preparation;
        log::debug!(
            "[LISTS] Appended {} to {} list at position {}",
            ingredient.id,
            preparation.as_str(),
            ingredient.position
        );
        self.items.push(ingredient);
        self.reindex();
    }

    /// Put `ingredient` at the head of a list, taking it out of wherever it was
    pub fn prepend(&mut self, preparation: Preparation, mut ingredient: Ingredient) {
        self.detach(ingredient.id);
        for ingr in self.items.iter_mut().filter(|i| i.preparation == preparation) {
            ingr.position += 1;
        }
        ingredient.position = FIRST_POSITION;
        ingredient.preparation = preparation;
        log::debug!("[LISTS] Prepended {} to {} list", ingredient.id, preparation.as_str());
        self.items.push(ingredient);
        self.reindex();
    }

    /// Delete an ingredient, closing the gap it leaves
    pub fn remove(&mut self, id: u32) -> EditorResult<Ingredient> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        log::debug!("[LISTS] Removed {} from {} list", id, removed.preparation.as_str());
        self.reindex();
        Ok(removed)
    }

    /// Move an ingredient to the end of the other list
    pub fn toggle_preparation(&mut self, id: u32) -> EditorResult<Preparation> {
        let ingr = self.get(id).cloned().ok_or(EditorError::NotFound(id))?;
        let destination = ingr.preparation.toggled();
        self.append(destination, ingr);
        Ok(destination)
    }

    // ========================
    // Data operations
    // ========================

    /// Merge data fields into an ingredient. Never changes list structure.
    pub fn update(&mut self, id: u32, patch: &IngredientPatch) -> EditorResult<&Ingredient> {
        let index = self.index_of(id)?;
        self.items[index].apply(patch);
        Ok(&self.items[index])
    }

    /// Switch to one of the ingredient's selectable units
    pub fn select_unit(&mut self, id: u32, unit_id: u32) -> EditorResult<&Ingredient> {
        let index = self.index_of(id)?;
        let unit = self.items[index].unit(unit_id).cloned().ok_or_else(|| {
            EditorError::InvalidState(format!("unit {} is not available for ingredient {}", unit_id, id))
        })?;
        self.items[index].current_unit = unit;
        Ok(&self.items[index])
    }

    pub fn set_being_dragged(&mut self, id: u32, flag: bool) -> EditorResult<()> {
        self.update(id, &IngredientPatch::being_dragged(flag)).map(|_| ())
    }

    /// Reset the drag flag on every ingredient (drag ended)
    pub fn clear_drag_flags(&mut self) {
        for ingr in self.items.iter_mut() {
            ingr.being_dragged = false;
        }
    }

    /// Ingredients whose persisted data differs from `before`.
    ///
    /// Ingredients that only exist on one side are not included.
    pub fn changed_since(&self, before: &IngredientLists) -> Vec<Ingredient> {
        self.items
            .iter()
            .filter(|now| match before.get(now.id) {
                Some(then) => !now.same_record(then),
                None => false,
            })
            .cloned()
            .collect()
    }

    // ========================
    // Internals
    // ========================

    fn index_of(&self, id: u32) -> EditorResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or(EditorError::NotFound(id))
    }

    fn detach(&mut self, id: u32) {
        if let Some(index) = self.items.iter().position(|i| i.id == id) {
            self.items.remove(index);
        }
    }

    /// Sort by (list, position, id) and renumber each list from 1
    fn reindex(&mut self) {
        self.items.sort_by_key(|i| (i.preparation, i.position, i.id));
        let mut next_normal = FIRST_POSITION;
        let mut next_prepared = FIRST_POSITION;
        for ingr in self.items.iter_mut() {
            let next = match ingr.preparation {
                Preparation::Normal => &mut next_normal,
                Preparation::Prepared => &mut next_prepared,
            };
            ingr.position = *next;
            *next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Article, Unit};

    fn gram() -> Unit {
        Unit { id: 1, short_name: "g".to_string(), long_name: "gram".to_string() }
    }

    fn litre() -> Unit {
        Unit { id: 2, short_name: "l".to_string(), long_name: "litre".to_string() }
    }

    fn make_ingredient(id: u32, position: u32, preparation: Preparation) -> Ingredient {
        let article = Article { name: format!("Article {}", id), comment: String::new() };
        let mut ingr = Ingredient::new(id, article, id as f64, gram(), vec![gram(), litre()]);
        ingr.position = position;
        ingr.preparation = preparation;
        ingr
    }

    fn three_normal() -> IngredientLists {
        IngredientLists::from_ingredients(vec![
            make_ingredient(1, 1, Preparation::Normal),
            make_ingredient(2, 2, Preparation::Normal),
            make_ingredient(3, 3, Preparation::Normal),
        ])
    }

    /// (id, position) pairs of one list
    fn layout(lists: &IngredientLists, preparation: Preparation) -> Vec<(u32, u32)> {
        lists.list(preparation).iter().map(|i| (i.id, i.position)).collect()
    }

    #[test]
    fn test_from_ingredients_orders_and_reindexes() {
        let lists = IngredientLists::from_ingredients(vec![
            make_ingredient(4, 9, Preparation::Prepared),
            make_ingredient(1, 5, Preparation::Normal),
            make_ingredient(2, 2, Preparation::Normal),
            make_ingredient(3, 0, Preparation::Prepared),
        ]);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(2, 1), (1, 2)]);
        assert_eq!(layout(&lists, Preparation::Prepared), vec![(3, 1), (4, 2)]);
    }

    #[test]
    fn test_from_ingredients_drops_duplicates() {
        let lists = IngredientLists::from_ingredients(vec![
            make_ingredient(1, 1, Preparation::Normal),
            make_ingredient(1, 1, Preparation::Prepared),
        ]);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists.locate(1), Some(Preparation::Normal));
    }

    #[test]
    fn test_swap_within_list() {
        let mut lists = three_normal();
        lists.move_within_same_list(1, 3).unwrap();
        assert_eq!(layout(&lists, Preparation::Normal), vec![(3, 1), (2, 2), (1, 3)]);
    }

    #[test]
    fn test_double_swap_restores_positions() {
        let mut lists = three_normal();
        let before = lists.clone();
        lists.move_within_same_list(1, 2).unwrap();
        lists.move_within_same_list(1, 2).unwrap();
        assert_eq!(lists, before);
    }

    #[test]
    fn test_swap_with_self_is_noop() {
        let mut lists = three_normal();
        let before = lists.clone();
        lists.move_within_same_list(2, 2).unwrap();
        assert_eq!(lists, before);
    }

    #[test]
    fn test_swap_across_lists_is_rejected() {
        let mut lists = three_normal();
        lists.append(Preparation::Prepared, make_ingredient(4, 0, Preparation::Normal));
        let before = lists.clone();
        let err = lists.move_within_same_list(1, 4).unwrap_err();
        assert!(matches!(err, EditorError::InvalidState(_)));
        assert_eq!(lists, before);
    }

    #[test]
    fn test_move_across_inserts_before_target() {
        let mut lists = IngredientLists::from_ingredients(vec![
            make_ingredient(1, 1, Preparation::Normal),
            make_ingredient(2, 2, Preparation::Normal),
            make_ingredient(3, 1, Preparation::Prepared),
            make_ingredient(4, 2, Preparation::Prepared),
        ]);
        lists.move_across_lists(1, 4).unwrap();
        assert_eq!(layout(&lists, Preparation::Normal), vec![(2, 1)]);
        assert_eq!(layout(&lists, Preparation::Prepared), vec![(3, 1), (1, 2), (4, 3)]);
        assert!(lists.get(1).unwrap().is_prepared());
    }

    #[test]
    fn test_move_across_same_list_is_rejected() {
        let mut lists = three_normal();
        let err = lists.move_across_lists(1, 2).unwrap_err();
        assert!(matches!(err, EditorError::InvalidState(_)));
    }

    #[test]
    fn test_move_ingredient_dispatches() {
        let mut lists = three_normal();
        lists.append(Preparation::Prepared, make_ingredient(4, 0, Preparation::Normal));
        lists.move_ingredient(3, 1).unwrap();
        assert_eq!(layout(&lists, Preparation::Normal), vec![(3, 1), (2, 2), (1, 3)]);
        lists.move_ingredient(4, 2).unwrap();
        assert_eq!(layout(&lists, Preparation::Normal), vec![(3, 1), (4, 2), (2, 3), (1, 4)]);
        assert!(lists.prepared().is_empty());
    }

    #[test]
    fn test_unknown_ids_report_not_found() {
        let mut lists = three_normal();
        assert_eq!(lists.move_ingredient(9, 1), Err(EditorError::NotFound(9)));
        assert_eq!(lists.move_within_same_list(1, 8), Err(EditorError::NotFound(8)));
        assert_eq!(lists.remove(7).unwrap_err(), EditorError::NotFound(7));
        assert_eq!(lists.update(6, &IngredientPatch::value(1.0)).unwrap_err(), EditorError::NotFound(6));
    }

    #[test]
    fn test_append_to_prepared() {
        let mut lists = three_normal();
        let second = lists.get(2).cloned().unwrap();
        lists.append(Preparation::Prepared, second);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(1, 1), (3, 2)]);
        assert_eq!(layout(&lists, Preparation::Prepared), vec![(2, 1)]);
        assert!(lists.get(2).unwrap().is_prepared());
    }

    #[test]
    fn test_append_new_ingredient() {
        let mut lists = three_normal();
        lists.append(Preparation::Normal, make_ingredient(9, 0, Preparation::Prepared));
        assert_eq!(
            layout(&lists, Preparation::Normal),
            vec![(1, 1), (2, 2), (3, 3), (9, 4)]
        );
        assert!(!lists.get(9).unwrap().is_prepared());
    }

    #[test]
    fn test_prepend_matches_destination_list() {
        let mut lists = IngredientLists::from_ingredients(vec![
            make_ingredient(1, 1, Preparation::Normal),
            make_ingredient(2, 1, Preparation::Prepared),
            make_ingredient(3, 2, Preparation::Prepared),
        ]);
        let third = lists.get(3).cloned().unwrap();
        lists.prepend(Preparation::Normal, third);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(3, 1), (1, 2)]);
        assert_eq!(layout(&lists, Preparation::Prepared), vec![(2, 1)]);
        assert!(!lists.get(3).unwrap().is_prepared());
    }

    #[test]
    fn test_prepend_within_same_list() {
        let mut lists = three_normal();
        let last = lists.get(3).cloned().unwrap();
        lists.prepend(Preparation::Normal, last);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut lists = three_normal();
        let removed = lists.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(1, 1), (3, 2)]);
    }

    #[test]
    fn test_update_changes_only_data() {
        let mut lists = three_normal();
        lists.update(2, &IngredientPatch::value(5.0)).unwrap();
        let ingr = lists.get(2).unwrap();
        assert_eq!(ingr.value, 5.0);
        assert_eq!(ingr.position, 2);
        assert!(!ingr.is_prepared());
        assert_eq!(layout(&lists, Preparation::Normal), vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_select_unit() {
        let mut lists = three_normal();
        assert_eq!(lists.select_unit(1, 2).unwrap().current_unit, litre());
        let err = lists.select_unit(1, 42).unwrap_err();
        assert!(matches!(err, EditorError::InvalidState(_)));
    }

    #[test]
    fn test_toggle_preparation() {
        let mut lists = three_normal();
        assert_eq!(lists.toggle_preparation(1).unwrap(), Preparation::Prepared);
        assert_eq!(lists.toggle_preparation(1).unwrap(), Preparation::Normal);
        assert_eq!(layout(&lists, Preparation::Normal), vec![(2, 1), (3, 2), (1, 3)]);
    }

    #[test]
    fn test_known_units_are_deduplicated() {
        let lists = three_normal();
        let ids: Vec<u32> = lists.known_units().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(IngredientLists::new().known_units().is_empty());
    }

    #[test]
    fn test_drag_flags() {
        let mut lists = three_normal();
        lists.set_being_dragged(2, true).unwrap();
        assert!(lists.get(2).unwrap().being_dragged);
        lists.clear_drag_flags();
        assert!(lists.iter().all(|i| !i.being_dragged));
    }

    #[test]
    fn test_changed_since_reports_moved_and_edited() {
        let mut lists = three_normal();
        let before = lists.clone();
        lists.move_within_same_list(1, 2).unwrap();
        lists.set_being_dragged(3, true).unwrap();
        let mut changed: Vec<u32> = lists.changed_since(&before).iter().map(|i| i.id).collect();
        changed.sort();
        assert_eq!(changed, vec![1, 2]);
    }
}
