//! Editor Context
//!
//! Shared editor handle provided via Leptos Context API. Every edit goes
//! through here: it is applied to the store at once and persisted in the
//! background. A failed push restores the state from before the edit, or
//! reloads from the backend when newer edits were made in the meantime.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use ingredients_core::reconciler::FIRST_POSITION;
use ingredients_core::sync::{self, EditAction, PendingEdits, Recovery, SyncPlan};
use ingredients_core::{EditorError, EditorResult, Ingredient, IngredientLists, IngredientPatch, Preparation, ProjectRef, Unit};
use leptos_dragdrop::{crosses_midpoint, VerticalHalf};

use crate::commands::HttpGateway;
use crate::config::EditorConfig;
use crate::store::{EditorStateStoreFields, EditorStore, LoadStatus};

/// Quiet period before typed values and comments are saved
const EDIT_DEBOUNCE_MS: u32 = 400;

/// Which end of a list a drop zone sits at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

/// Drop zone at the start or end of a list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boundary {
    pub list: Preparation,
    pub edge: Edge,
}

impl Boundary {
    pub fn new(list: Preparation, edge: Edge) -> Self {
        Self { list, edge }
    }

    /// The edit a drop here stands for
    pub fn action(&self, id: u32) -> EditAction {
        match self.edge {
            Edge::Leading => EditAction::Prepend { list: self.list, id },
            Edge::Trailing => EditAction::Append { list: self.list, id },
        }
    }

    /// True when `ingredient` already sits at this end of the list
    pub fn holds(&self, lists: &IngredientLists, ingredient: &Ingredient) -> bool {
        if ingredient.preparation != self.list {
            return false;
        }
        match self.edge {
            Edge::Leading => ingredient.position == FIRST_POSITION,
            Edge::Trailing => ingredient.position as usize == lists.list_len(self.list),
        }
    }
}

#[derive(Clone)]
pub struct EditorContext {
    pub store: EditorStore,
    gateway: HttpGateway,
    project: ProjectRef,
    units: Vec<Unit>,
    /// Cleared when the editor unmounts; late responses are dropped
    mounted: Arc<AtomicBool>,
    /// Ticket of the latest debounced edit
    edits: Arc<AtomicU64>,
}

/// Get the editor context
pub fn use_editor() -> EditorContext {
    expect_context::<EditorContext>()
}

impl EditorContext {
    pub fn new(store: EditorStore, config: &EditorConfig) -> Self {
        Self {
            store,
            gateway: HttpGateway::new(config.backend_url.clone()),
            project: config.project.clone(),
            units: config.units.clone(),
            mounted: Arc::new(AtomicBool::new(true)),
            edits: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn project(&self) -> &ProjectRef {
        &self.project
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        log::debug!("[EDITOR] Unmounted, dropping pending responses");
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Units offered when creating an ingredient
    pub fn known_units(&self) -> Vec<Unit> {
        let mut units = self.units.clone();
        for unit in self.store.lists().with(|lists| lists.known_units()) {
            if !units.iter().any(|u| u.id == unit.id) {
                units.push(unit);
            }
        }
        units
    }

    // ========================
    // Loading
    // ========================

    /// Fetch both lists, replacing whatever is shown
    pub fn load(&self) {
        self.store.status().set(LoadStatus::Loading);
        let ctx = self.clone();
        spawn_local(async move {
            let (lists, error) = sync::load(&ctx.gateway, &ctx.project).await;
            if !ctx.is_mounted() {
                return;
            }
            ctx.store.drag_origin().set(None);
            ctx.store.pending().set(PendingEdits::default());
            ctx.replace(lists);
            match error {
                Some(e) => {
                    ctx.store.status().set(LoadStatus::Failed);
                    ctx.report(e);
                }
                None => ctx.store.status().set(LoadStatus::Ready),
            }
        });
    }

    fn replace(&self, lists: IngredientLists) {
        self.store.lists().set(lists);
        self.store.generation().update(|g| *g += 1);
        self.bump();
    }

    fn bump(&self) -> u64 {
        self.store.revision().update(|r| *r += 1);
        self.store.revision().get_untracked()
    }

    // ========================
    // Edits
    // ========================

    /// Apply an edit and persist it right away
    pub fn perform(&self, action: EditAction) {
        log::debug!("[EDITOR] {:?}", action);
        self.flush_edits();
        let result = {
            let lists_field = self.store.lists();
            let mut lists = lists_field.write();
            sync::apply(&mut *lists, &action)
        };
        match result {
            Ok(plan) => {
                let revision = self.bump();
                if !plan.is_empty() {
                    self.push(plan, revision);
                }
            }
            Err(e) => self.report(e),
        }
    }

    /// Apply a typed change at once; save it after the typing pauses.
    /// Consecutive edits are saved together.
    pub fn edit(&self, id: u32, patch: IngredientPatch) {
        let mut pending = std::mem::take(&mut *self.store.pending().write());
        let result = {
            let lists_field = self.store.lists();
            let mut lists = lists_field.write();
            pending.record(&mut *lists, id, &patch)
        };
        self.store.pending().set(pending);
        if let Err(e) = result {
            self.report(e);
            return;
        }
        self.bump();

        let ticket = self.edits.fetch_add(1, Ordering::SeqCst) + 1;
        let ctx = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(EDIT_DEBOUNCE_MS).await;
            if ctx.is_mounted() && ctx.edits.load(Ordering::SeqCst) == ticket {
                ctx.flush_edits();
            }
        });
    }

    /// Save held-back typed edits now. Runs before every structural edit so
    /// they are diffed against the state they were made in.
    fn flush_edits(&self) {
        if !self.store.pending().with_untracked(|pending| pending.is_pending()) {
            return;
        }
        // Outdates the running debounce timer
        self.edits.fetch_add(1, Ordering::SeqCst);
        let mut pending = std::mem::take(&mut *self.store.pending().write());
        let plan = self.store.lists().with_untracked(|lists| pending.take_plan(lists));
        if let Some(plan) = plan {
            let revision = self.store.revision().get_untracked();
            self.push(plan, revision);
        }
    }

    /// Create an ingredient at the end of the normal list.
    /// Nothing is shown until the backend returned its id.
    pub async fn create(&self, draft: Ingredient) -> bool {
        let list = Preparation::Normal;
        let list_len = self.store.lists().with_untracked(|lists| lists.list_len(list));
        let created = sync::create_ingredient(&self.gateway, &self.project, draft, list, list_len).await;
        if !self.is_mounted() {
            return false;
        }
        let created = match created {
            Ok(created) => created,
            Err(e) => {
                self.report(e);
                return false;
            }
        };

        let (id, sent_position) = (created.id, created.position);
        self.flush_edits();
        {
            self.store.lists().write().append(list, created);
        }
        let revision = self.bump();

        // Other edits may have changed the list while the request was out
        let landed = self.store.lists().with_untracked(|lists| lists.get(id).cloned());
        if let Some(landed) = landed.filter(|i| i.position != sent_position) {
            log::debug!("[EDITOR] Ingredient {} landed at {}, not {}", id, landed.position, sent_position);
            let current = self.store.lists().get_untracked();
            self.push(SyncPlan::overwrite(current, landed), revision);
        }
        true
    }

    // ========================
    // Dragging
    // ========================

    pub fn begin_drag(&self, id: u32) {
        log::debug!("[DND] Start dragging {}", id);
        self.flush_edits();
        let origin = self.store.lists().get_untracked();
        self.store.drag_origin().set(Some(origin));
        let result = self.store.lists().write().set_being_dragged(id, true);
        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Pointer moved over another row. Rows of the same list swap once the
    /// pointer crossed the middle of the hovered row; rows of the other
    /// list take the dragged one in at once.
    pub fn hover_item(&self, dragged: u32, hovered: u32, half: VerticalHalf) {
        let spots = self.store.lists().with_untracked(|lists| {
            let from = lists.get(dragged)?;
            let to = lists.get(hovered)?;
            Some(((from.preparation, from.position), (to.preparation, to.position)))
        });
        let Some(((from_list, from_pos), (to_list, to_pos))) = spots else { return };
        if from_list == to_list && !crosses_midpoint(from_pos, to_pos, half) {
            return;
        }
        self.move_locally(|lists| lists.move_ingredient(dragged, hovered));
    }

    /// Pointer entered the start or end zone of a list
    pub fn hover_boundary(&self, dragged: u32, boundary: Boundary) {
        let placed = self.store.lists().with_untracked(|lists| {
            lists.get(dragged).map(|ingr| boundary.holds(lists, ingr))
        });
        if placed != Some(false) {
            return;
        }
        let action = boundary.action(dragged);
        self.move_locally(|lists| sync::apply(lists, &action).map(|_| ()));
    }

    /// Persist everything the drag changed
    pub fn end_drag(&self, dragged: u32) {
        {
            self.store.lists().write().clear_drag_flags();
        }
        let origin = self.store.drag_origin().write().take();
        let Some(origin) = origin else { return };
        let plan = self.store.lists().with_untracked(|lists| SyncPlan::diff(origin, lists));
        log::debug!("[DND] Dropped {}, {} ingredients to save", dragged, plan.writes().len());
        if !plan.is_empty() {
            let revision = self.store.revision().get_untracked();
            self.push(plan, revision);
        }
    }

    /// Move rows while dragging; saved when the drag ends
    fn move_locally(&self, op: impl FnOnce(&mut IngredientLists) -> EditorResult<()>) {
        let result = {
            let lists_field = self.store.lists();
            let mut lists = lists_field.write();
            op(&mut *lists)
        };
        match result {
            Ok(()) => {
                self.bump();
            }
            Err(e) => self.report(e),
        }
    }

    // ========================
    // Persistence & errors
    // ========================

    fn push(&self, plan: SyncPlan, revision: u64) {
        let ctx = self.clone();
        spawn_local(async move {
            let Err(failure) = plan.push(&ctx.gateway, &ctx.project).await else { return };
            if !ctx.is_mounted() {
                return;
            }
            let newer_edits = ctx.store.revision().get_untracked() != revision;
            match plan.recover(&failure, newer_edits) {
                Recovery::Rollback(lists) => {
                    log::warn!("[SYNC] Saving failed, rolling back: {}", failure.error);
                    ctx.replace(lists);
                }
                Recovery::Reload => {
                    log::warn!(
                        "[SYNC] Saving failed after {} requests went through, reloading: {}",
                        failure.completed,
                        failure.error
                    );
                    ctx.load();
                }
            }
            ctx.report(failure.error);
        });
    }

    pub fn report(&self, error: EditorError) {
        if error.is_remote() {
            log::error!("[EDITOR] {}", error);
        } else {
            log::warn!("[EDITOR] {}", error);
        }
        self.store.last_error().set(Some(error.to_string()));
    }

    pub fn dismiss_error(&self) {
        self.store.last_error().set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredients_core::{Article, Unit};

    fn lists() -> IngredientLists {
        let gram = Unit { id: 1, short_name: "g".to_string(), long_name: "gram".to_string() };
        let make = |id: u32, position: u32, preparation: Preparation| {
            let article = Article { name: format!("Article {}", id), comment: String::new() };
            let mut ingr = Ingredient::new(id, article, 1.0, gram.clone(), vec![gram.clone()]);
            ingr.position = position;
            ingr.preparation = preparation;
            ingr
        };
        IngredientLists::from_ingredients(vec![
            make(1, 1, Preparation::Normal),
            make(2, 2, Preparation::Normal),
            make(3, 1, Preparation::Prepared),
        ])
    }

    #[test]
    fn test_boundary_action() {
        let leading = Boundary::new(Preparation::Prepared, Edge::Leading);
        let trailing = Boundary::new(Preparation::Normal, Edge::Trailing);
        assert_eq!(leading.action(2), EditAction::Prepend { list: Preparation::Prepared, id: 2 });
        assert_eq!(trailing.action(3), EditAction::Append { list: Preparation::Normal, id: 3 });
    }

    #[test]
    fn test_boundary_holds() {
        let lists = lists();
        let first = lists.get(1).cloned().unwrap();
        let last = lists.get(2).cloned().unwrap();
        let prepared = lists.get(3).cloned().unwrap();

        let normal_start = Boundary::new(Preparation::Normal, Edge::Leading);
        let normal_end = Boundary::new(Preparation::Normal, Edge::Trailing);
        assert!(normal_start.holds(&lists, &first));
        assert!(!normal_start.holds(&lists, &last));
        assert!(normal_end.holds(&lists, &last));
        assert!(!normal_end.holds(&lists, &first));
        // Sole member of the other list still has to move
        assert!(!normal_end.holds(&lists, &prepared));
        assert!(Boundary::new(Preparation::Prepared, Edge::Trailing).holds(&lists, &prepared));
    }
}
