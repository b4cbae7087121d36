//! Optimistic Synchronization
//!
//! Edits are applied to the local lists first. The difference between the
//! state before and after an edit becomes a `SyncPlan` that is pushed to the
//! backend. When a push fails before any request went through and nothing
//! was edited since, the caller restores the snapshot kept in the plan;
//! otherwise it reloads. New ingredients are the exception: the backend
//! assigns their id, so `create_ingredient` waits for it before anything
//! is shown.

use crate::domain::{EditorError, EditorResult, Ingredient, IngredientPatch, Preparation, ProjectRef};
use crate::gateway::IngredientGateway;
use crate::reconciler::IngredientLists;

/// A user edit, as raised by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Drag `source` onto `target` (swap or cross-list insert)
    Move { source: u32, target: u32 },
    /// Drop on the trailing boundary of a list
    Append { list: Preparation, id: u32 },
    /// Drop on the leading boundary of a list
    Prepend { list: Preparation, id: u32 },
    /// Move to the end of the other list
    TogglePreparation { id: u32 },
    Remove { id: u32 },
    Update { id: u32, patch: IngredientPatch },
    SelectUnit { id: u32, unit_id: u32 },
}

/// Apply an edit to `lists` and describe what the backend needs to learn.
///
/// On error `lists` is left unchanged.
pub fn apply(lists: &mut IngredientLists, action: &EditAction) -> EditorResult<SyncPlan> {
    let before = lists.clone();
    match action {
        EditAction::Move { source, target } => lists.move_ingredient(*source, *target)?,
        EditAction::Append { list, id } => {
            let ingr = lists.get(*id).cloned().ok_or(EditorError::NotFound(*id))?;
            lists.append(*list, ingr);
        }
        EditAction::Prepend { list, id } => {
            let ingr = lists.get(*id).cloned().ok_or(EditorError::NotFound(*id))?;
            lists.prepend(*list, ingr);
        }
        EditAction::TogglePreparation { id } => {
            lists.toggle_preparation(*id)?;
        }
        EditAction::Remove { id } => {
            lists.remove(*id)?;
        }
        EditAction::Update { id, patch } => {
            lists.update(*id, patch)?;
        }
        EditAction::SelectUnit { id, unit_id } => {
            lists.select_unit(*id, *unit_id)?;
        }
    }
    Ok(SyncPlan::diff(before, lists))
}

/// Backend writes needed to go from one state to another
#[derive(Debug, Clone)]
pub struct SyncPlan {
    before: IngredientLists,
    deletes: Vec<u32>,
    writes: Vec<Ingredient>,
}

impl SyncPlan {
    /// Deletes for ingredients that disappeared, updates for ingredients
    /// whose stored data changed. Ingredients only present in `after` are
    /// ignored; they are created through `create_ingredient`.
    pub fn diff(before: IngredientLists, after: &IngredientLists) -> Self {
        let deletes = before
            .iter()
            .filter(|i| !after.contains(i.id))
            .map(|i| i.id)
            .collect();
        let writes = after.changed_since(&before);
        Self { before, deletes, writes }
    }

    /// Overwrite a single ingredient, e.g. when a created ingredient
    /// landed at another position than the one it was created with
    pub fn overwrite(before: IngredientLists, ingredient: Ingredient) -> Self {
        Self { before, deletes: Vec::new(), writes: vec![ingredient] }
    }

    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.writes.is_empty()
    }

    pub fn deletes(&self) -> &[u32] {
        &self.deletes
    }

    pub fn writes(&self) -> &[Ingredient] {
        &self.writes
    }

    /// Send the plan, deletes first. Stops at the first failure and
    /// reports how many requests had already gone through.
    pub async fn push<G>(&self, gateway: &G, project: &ProjectRef) -> Result<(), PushFailure>
    where
        G: IngredientGateway + ?Sized,
    {
        let mut completed = 0;
        for id in &self.deletes {
            if let Err(error) = gateway.delete(project, *id).await {
                return Err(PushFailure { error, completed });
            }
            completed += 1;
        }
        for ingr in &self.writes {
            if let Err(error) = gateway.update(project, ingr).await {
                return Err(PushFailure { error, completed });
            }
            completed += 1;
        }
        if !self.is_empty() {
            log::debug!(
                "[SYNC] Pushed {} deletes, {} updates",
                self.deletes.len(),
                self.writes.len()
            );
        }
        Ok(())
    }

    /// The state before the edit
    pub fn rollback(self) -> IngredientLists {
        self.before
    }

    /// What to show after `failure`. The snapshot is only valid while
    /// the backend still holds it, so a push that got partway through, or
    /// local edits made since, call for a reload instead.
    pub fn recover(self, failure: &PushFailure, newer_edits: bool) -> Recovery {
        if failure.is_partial() || newer_edits {
            Recovery::Reload
        } else {
            Recovery::Rollback(self.rollback())
        }
    }
}

/// A push that stopped at a failed request
#[derive(Debug, Clone, PartialEq)]
pub struct PushFailure {
    pub error: EditorError,
    /// Requests that succeeded before the failure
    pub completed: usize,
}

impl PushFailure {
    /// True when the backend already applied part of the plan
    pub fn is_partial(&self) -> bool {
        self.completed > 0
    }
}

/// How to get back in line with the backend after a failed push
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    Rollback(IngredientLists),
    Reload,
}

/// Typed edits not yet saved, with the lists as they were before the first
#[derive(Debug, Clone, Default)]
pub struct PendingEdits {
    origin: Option<IngredientLists>,
}

impl PendingEdits {
    pub fn is_pending(&self) -> bool {
        self.origin.is_some()
    }

    /// Apply `patch` to `lists`. Patches the backend stores are held back
    /// until `take_plan`.
    pub fn record(&mut self, lists: &mut IngredientLists, id: u32, patch: &IngredientPatch) -> EditorResult<()> {
        let before = (patch.is_persistent() && self.origin.is_none()).then(|| lists.clone());
        lists.update(id, patch)?;
        if before.is_some() {
            self.origin = before;
        }
        Ok(())
    }

    /// Everything recorded so far as one plan. Call it before a structural
    /// edit too, so the held-back edits go out against the state they were
    /// made in.
    pub fn take_plan(&mut self, lists: &IngredientLists) -> Option<SyncPlan> {
        let origin = self.origin.take()?;
        let plan = SyncPlan::diff(origin, lists);
        (!plan.is_empty()).then_some(plan)
    }
}

/// Fetch both lists. A failed fetch yields empty lists plus the error,
/// so the editor can still render its placeholders.
pub async fn load<G>(gateway: &G, project: &ProjectRef) -> (IngredientLists, Option<EditorError>)
where
    G: IngredientGateway + ?Sized,
{
    match gateway.fetch_all(project).await {
        Ok(ingredients) => {
            log::info!("[SYNC] Loaded {} ingredients", ingredients.len());
            (IngredientLists::from_ingredients(ingredients), None)
        }
        Err(e) => {
            log::warn!("[SYNC] Loading ingredients failed: {}", e);
            (IngredientLists::new(), Some(e))
        }
    }
}

/// Create an ingredient at the end of `list`, as the next position after
/// `list_len` existing ones. Returns the ingredient carrying its new id.
pub async fn create_ingredient<G>(
    gateway: &G,
    project: &ProjectRef,
    mut ingredient: Ingredient,
    list: Preparation,
    list_len: usize,
) -> EditorResult<Ingredient>
where
    G: IngredientGateway + ?Sized,
{
    ingredient.preparation = list;
    ingredient.position = list_len as u32 + 1;
    ingredient.being_dragged = false;
    let id = gateway.create(project, &ingredient).await?;
    log::info!("[SYNC] Created ingredient {} in {} list", id, list.as_str());
    ingredient.id = id;
    Ok(ingredient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Article, Unit};

    fn make_ingredient(id: u32, position: u32, preparation: Preparation) -> Ingredient {
        let unit = Unit { id: 1, short_name: "g".to_string(), long_name: "gram".to_string() };
        let mut ingr = Ingredient::new(id, Article::default(), 1.0, unit.clone(), vec![unit]);
        ingr.position = position;
        ingr.preparation = preparation;
        ingr
    }

    fn lists() -> IngredientLists {
        IngredientLists::from_ingredients(vec![
            make_ingredient(1, 1, Preparation::Normal),
            make_ingredient(2, 2, Preparation::Normal),
            make_ingredient(3, 3, Preparation::Normal),
        ])
    }

    #[test]
    fn test_remove_plans_delete_and_renumbering() {
        let mut state = lists();
        let plan = apply(&mut state, &EditAction::Remove { id: 1 }).unwrap();
        assert_eq!(plan.deletes(), &[1]);
        let written: Vec<(u32, u32)> = plan.writes().iter().map(|i| (i.id, i.position)).collect();
        assert_eq!(written, vec![(2, 1), (3, 2)]);
    }

    #[test]
    fn test_drag_flag_needs_no_write() {
        let mut state = lists();
        let patch = IngredientPatch::being_dragged(true);
        let plan = apply(&mut state, &EditAction::Update { id: 2, patch }).unwrap();
        assert!(plan.is_empty());
        assert!(state.get(2).unwrap().being_dragged);
    }

    #[test]
    fn test_failed_action_leaves_state() {
        let mut state = lists();
        let before = state.clone();
        let err = apply(&mut state, &EditAction::Append { list: Preparation::Prepared, id: 9 }).unwrap_err();
        assert_eq!(err, EditorError::NotFound(9));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rollback_returns_snapshot() {
        let mut state = lists();
        let before = state.clone();
        let plan = apply(&mut state, &EditAction::Prepend { list: Preparation::Prepared, id: 3 }).unwrap();
        assert_ne!(state, before);
        assert_eq!(plan.rollback(), before);
    }
}
