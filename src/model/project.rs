// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::grid::Grid;
use super::ids::{GridId, IdMinter};

/// What the side panel currently has focused (e.g. a grid button). Cleared
/// when the entity it points at is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSelection {
    instance_id: String,
    kind: String,
}

impl PanelSelection {
    pub fn new(instance_id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            kind: kind.into(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// The top-level container the editor runs against: every grid, the pointer
/// to the one grid currently on canvas, and the panel selection.
///
/// At most one grid is active at a time; the id minter is project-scoped so
/// freshly spawned nodes and handles get distinct ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    grids: Vec<Grid>,
    active_grid_id: Option<GridId>,
    selection: Option<PanelSelection>,
    minter: IdMinter,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grids: Vec::new(),
            active_grid_id: None,
            selection: None,
            minter: IdMinter::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn add_grid(&mut self, grid: Grid) {
        self.grids.push(grid);
    }

    /// Removes and returns the grid, if present. Does not touch the active
    /// pointer; lifecycle fallback is the editor's responsibility.
    pub fn remove_grid(&mut self, grid_id: &GridId) -> Option<Grid> {
        let index = self.grids.iter().position(|g| g.instance_id() == grid_id)?;
        Some(self.grids.remove(index))
    }

    pub fn grid(&self, grid_id: &GridId) -> Option<&Grid> {
        self.grids.iter().find(|g| g.instance_id() == grid_id)
    }

    pub fn grid_mut(&mut self, grid_id: &GridId) -> Option<&mut Grid> {
        self.grids.iter_mut().find(|g| g.instance_id() == grid_id)
    }

    pub fn grid_by_method_ref(&self, method_ref: &str) -> Option<&Grid> {
        self.grids.iter().find(|g| g.method_ref() == method_ref)
    }

    pub fn grid_by_method_ref_mut(&mut self, method_ref: &str) -> Option<&mut Grid> {
        self.grids.iter_mut().find(|g| g.method_ref() == method_ref)
    }

    pub fn active_grid_id(&self) -> Option<&GridId> {
        self.active_grid_id.as_ref()
    }

    pub fn set_active_grid_id(&mut self, grid_id: Option<GridId>) {
        self.active_grid_id = grid_id;
    }

    pub fn active_grid(&self) -> Option<&Grid> {
        let active = self.active_grid_id.as_ref()?;
        self.grid(active)
    }

    pub fn active_grid_mut(&mut self) -> Option<&mut Grid> {
        let active = self.active_grid_id.clone()?;
        self.grid_mut(&active)
    }

    pub fn selection(&self) -> Option<&PanelSelection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<PanelSelection>) {
        self.selection = selection;
    }

    pub fn minter_mut(&mut self) -> &mut IdMinter {
        &mut self.minter
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::fixtures;
    use crate::model::ids::GridId;

    #[test]
    fn grids_are_found_by_id_and_by_method_ref() {
        let mut project = Project::new("Demo");
        let grid = fixtures::empty_grid("g:1", "Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1");
        project.add_grid(grid);

        let by_id = project
            .grid(&GridId::new("g:1").expect("grid id"))
            .expect("grid by id");
        assert_eq!(
            by_id.method_ref(),
            "Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1"
        );

        assert!(project
            .grid_by_method_ref("Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1")
            .is_some());
        assert!(project.grid_by_method_ref("missing").is_none());
    }

    #[test]
    fn removing_a_grid_leaves_the_active_pointer_alone() {
        let mut project = Project::new("Demo");
        project.add_grid(fixtures::empty_grid("g:1", "ref-a"));
        let grid_id = GridId::new("g:1").expect("grid id");
        project.set_active_grid_id(Some(grid_id.clone()));

        let removed = project.remove_grid(&grid_id).expect("removed grid");
        assert_eq!(removed.instance_id(), &grid_id);
        assert_eq!(project.active_grid_id(), Some(&grid_id));
        assert!(project.active_grid().is_none());
    }
}
