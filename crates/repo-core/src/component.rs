// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Components
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Repository components and the arena that links them into a tree.
//!
//! Each component owns one nuclide model and one thermal model. Parents
//! and daughters refer to each other by [`ComponentId`], an index into the
//! [`ComponentTree`] arena.

use crate::report::{ComponentRow, ContaminantRow, ReportSink};
use repo_nuclide::{NuclideModel, NuclideModelVariant, ThermalModel, ThermalModelVariant};
use repo_types::config::ComponentConfig;
use repo_types::error::{RepoError, RepoResult};
use repo_types::geometry::{BoundaryType, Geometry, Point3};
use repo_types::mat_data::MatDataTable;
use repo_types::material::{Composition, Time, WasteBatch};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a component, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    WasteForm,
    WastePackage,
    Buffer,
    FarField,
}

impl ComponentType {
    /// Transport order: each level sees the already updated level inside it.
    pub const TRANSPORT_ORDER: [ComponentType; 4] = [
        ComponentType::WasteForm,
        ComponentType::WastePackage,
        ComponentType::Buffer,
        ComponentType::FarField,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComponentType::WasteForm => "WF",
            ComponentType::WastePackage => "WP",
            ComponentType::Buffer => "BUFFER",
            ComponentType::FarField => "FF",
        }
    }

    pub fn from_name(name: &str) -> RepoResult<Self> {
        Self::TRANSPORT_ORDER
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| {
                RepoError::Configuration(format!(
                    "unknown component type '{name}', expected one of: WF, WP, BUFFER, FF"
                ))
            })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Component {
    id: Option<ComponentId>,
    name: String,
    component_type: ComponentType,
    mat_table: Arc<MatDataTable>,
    temp_limit: f64,
    tox_limit: f64,
    thermal_model: Option<ThermalModelVariant>,
    nuclide_model: Option<NuclideModelVariant>,
    parent: Option<ComponentId>,
    daughters: Vec<ComponentId>,
}

impl Component {
    /// Build a component from its parts.
    ///
    /// Fails with [`RepoError::Configuration`] when either model is missing.
    pub fn init(
        name: &str,
        component_type: ComponentType,
        mat_table: Arc<MatDataTable>,
        inner_radius: f64,
        outer_radius: f64,
        thermal_model: Option<ThermalModelVariant>,
        nuclide_model: Option<NuclideModelVariant>,
    ) -> RepoResult<Self> {
        let (Some(thermal_model), Some(mut nuclide_model)) = (thermal_model, nuclide_model) else {
            return Err(RepoError::Configuration(format!(
                "component '{name}' needs both a thermal and a nuclide model"
            )));
        };
        let geom = nuclide_model.geom_mut();
        geom.set_radius(BoundaryType::Inner, inner_radius);
        geom.set_radius(BoundaryType::Outer, outer_radius);
        log::debug!(
            "initialized {component_type} component '{name}' with {} / {}",
            nuclide_model.name(),
            thermal_model.name()
        );
        Ok(Component {
            id: None,
            name: name.to_string(),
            component_type,
            mat_table,
            temp_limit: repo_types::constants::DEFAULT_TEMP_LIMIT,
            tox_limit: repo_types::constants::DEFAULT_TOX_LIMIT,
            thermal_model: Some(thermal_model),
            nuclide_model: Some(nuclide_model),
            parent: None,
            daughters: Vec::new(),
        })
    }

    /// Build a template from configuration, resolving its material table by name.
    pub fn from_config(
        cfg: &ComponentConfig,
        materials: &BTreeMap<String, Arc<MatDataTable>>,
    ) -> RepoResult<Self> {
        let mat_table = match &cfg.material_data {
            Some(name) => materials.get(name).cloned().ok_or_else(|| {
                RepoError::Configuration(format!(
                    "component '{}' references unknown material data '{}'",
                    cfg.name, name
                ))
            })?,
            None => Arc::new(MatDataTable::default()),
        };
        let thermal = ThermalModelVariant::from_config(&cfg.thermal_model)?;
        let nuclide = NuclideModelVariant::from_config(&cfg.nuclide_model, Arc::clone(&mat_table))?;
        let mut component = Self::init(
            &cfg.name,
            ComponentType::from_name(&cfg.component_type)?,
            mat_table,
            cfg.inner_radius,
            cfg.outer_radius_or_unbounded(),
            Some(thermal),
            Some(nuclide),
        )?;
        component.temp_limit = cfg.temp_limit;
        component.tox_limit = cfg.tox_limit;
        Ok(component)
    }

    /// A new, unlinked component with this one's name, type, material and
    /// geometry, and fresh models stamped at `time`.
    ///
    /// Fails with [`RepoError::NullModel`] when this component lacks a model.
    pub fn fresh_copy(&self, time: Time) -> RepoResult<Self> {
        let thermal = self.thermal_model.as_ref().ok_or_else(|| {
            RepoError::NullModel(format!("component '{}' has no thermal model", self.name))
        })?;
        let nuclide = self.nuclide_model.as_ref().ok_or_else(|| {
            RepoError::NullModel(format!("component '{}' has no nuclide model", self.name))
        })?;
        Ok(Component {
            id: None,
            name: self.name.clone(),
            component_type: self.component_type,
            mat_table: Arc::clone(&self.mat_table),
            temp_limit: self.temp_limit,
            tox_limit: self.tox_limit,
            thermal_model: Some(thermal.fresh_copy()),
            nuclide_model: Some(nuclide.fresh_copy(time)),
            parent: None,
            daughters: Vec::new(),
        })
    }

    /// Arena id, once added to a [`ComponentTree`].
    pub fn id(&self) -> Option<ComponentId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn mat_table(&self) -> &MatDataTable {
        &self.mat_table
    }

    /// Geometry as held by the nuclide model; the default geometry while
    /// the model is detached.
    pub fn geom(&self) -> Geometry {
        self.nuclide_model
            .as_ref()
            .map(|m| m.geom().clone())
            .unwrap_or_default()
    }

    pub fn x(&self) -> f64 {
        self.geom().x()
    }

    pub fn y(&self) -> f64 {
        self.geom().y()
    }

    pub fn z(&self) -> f64 {
        self.geom().z()
    }

    pub fn temp_limit(&self) -> f64 {
        self.temp_limit
    }

    pub fn tox_limit(&self) -> f64 {
        self.tox_limit
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn daughters(&self) -> &[ComponentId] {
        &self.daughters
    }

    pub fn nuclide_model(&self) -> Option<&NuclideModelVariant> {
        self.nuclide_model.as_ref()
    }

    pub fn thermal_model(&self) -> Option<&ThermalModelVariant> {
        self.thermal_model.as_ref()
    }

    pub fn set_placement(&mut self, centroid: Point3, length: f64) {
        match self.nuclide_model.as_mut() {
            Some(model) => {
                let geom = model.geom_mut();
                geom.set_centroid(centroid);
                geom.set_length(length);
            }
            None => log::error!("component '{}' cannot be placed: no nuclide model", self.name),
        }
    }

    pub fn wastes(&self) -> &[WasteBatch] {
        self.nuclide_model.as_ref().map_or(&[], |m| m.wastes())
    }

    pub fn contained_mass(&self) -> f64 {
        self.nuclide_model
            .as_ref()
            .map_or(0.0, |m| m.contained_mass())
    }

    /// Hand waste to the nuclide model. Failures are logged, not returned.
    pub fn absorb(&mut self, batch: WasteBatch) {
        match self.nuclide_model.as_mut() {
            Some(model) => model.absorb(batch),
            None => log::error!("component '{}' cannot absorb: no nuclide model", self.name),
        }
    }

    /// Take waste from the nuclide model. Failures are logged and give `None`.
    pub fn extract(&mut self, composition: &Composition, mass: f64) -> Option<WasteBatch> {
        let Some(model) = self.nuclide_model.as_mut() else {
            log::error!("component '{}' cannot extract: no nuclide model", self.name);
            return None;
        };
        match model.extract(composition, mass) {
            Ok(batch) => Some(batch),
            Err(e) => {
                log::error!("extract from component '{}' failed: {e}", self.name);
                None
            }
        }
    }

    pub fn transport_heat(&mut self, time: Time) {
        match self.thermal_model.as_mut() {
            Some(model) => model.transport_heat(time),
            None => log::error!("component '{}' has no thermal model", self.name),
        }
    }

    pub fn peak_temp(&self) -> f64 {
        self.thermal_model.as_ref().map_or(0.0, |m| m.peak_temp())
    }

    pub fn temp(&self) -> f64 {
        self.thermal_model.as_ref().map_or(0.0, |m| m.temp())
    }

    pub fn component_row(&self) -> ComponentRow {
        let geom = self.geom();
        ComponentRow {
            comp_id: self.id.map_or(0, |id| id.0),
            parent_id: self.parent.map(|id| id.0),
            comp_type: self.component_type.name().to_string(),
            name: self.name.clone(),
            material_data: self.mat_table.name.clone(),
            nuclide_model: self
                .nuclide_model
                .as_ref()
                .map_or(String::new(), |m| m.name().to_string()),
            thermal_model: self
                .thermal_model
                .as_ref()
                .map_or(String::new(), |m| m.name().to_string()),
            inner_radius: geom.inner_radius(),
            outer_radius: geom.outer_radius(),
            x: geom.x(),
            y: geom.y(),
            z: geom.z(),
        }
    }

    /// One row per isotope held at `time`.
    pub fn update_contaminant_table(&self, time: Time, sink: &mut dyn ReportSink) {
        let Some(model) = self.nuclide_model.as_ref() else {
            return;
        };
        let comp_id = self.id.map_or(0, |id| id.0);
        let (composition, mass) = model.vec_hist(time);
        for (iso, frac) in composition.iter() {
            sink.add_contaminant_row(ContaminantRow {
                comp_id,
                time,
                iso_id: iso,
                mass_kg: frac * mass,
                avail_conc: model.conc_hist_iso(time, iso),
            });
        }
    }
}

/// Arena owning every placed component.
#[derive(Debug, Clone, Default)]
pub struct ComponentTree {
    nodes: Vec<Component>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Take ownership of `component` and assign its id.
    pub fn add(&mut self, mut component: Component) -> ComponentId {
        let id = ComponentId(self.nodes.len());
        component.id = Some(id);
        self.nodes.push(component);
        id
    }

    pub fn get(&self, id: ComponentId) -> RepoResult<&Component> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| RepoError::Configuration(format!("no component {id}")))
    }

    pub fn get_mut(&mut self, id: ComponentId) -> RepoResult<&mut Component> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| RepoError::Configuration(format!("no component {id}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.nodes.iter()
    }

    /// Make `daughter` a child of `parent`.
    pub fn load(&mut self, parent: ComponentId, daughter: ComponentId) -> RepoResult<()> {
        if parent == daughter {
            return Err(RepoError::Configuration(format!(
                "component {parent} cannot contain itself"
            )));
        }
        self.get(parent)?;
        let previous = self.get_mut(daughter)?.parent.replace(parent);
        if let Some(old) = previous {
            if let Ok(old_parent) = self.get_mut(old) {
                old_parent.daughters.retain(|&d| d != daughter);
            }
        }
        self.get_mut(parent)?.daughters.push(daughter);
        Ok(())
    }

    /// Buffers are full once their daughters' lengths cover their own;
    /// every other type counts as full after a single load.
    pub fn is_full(&self, id: ComponentId) -> RepoResult<bool> {
        let component = self.get(id)?;
        match component.component_type {
            ComponentType::Buffer => {
                let mut loaded = 0.0;
                for &d in &component.daughters {
                    loaded += self.get(d)?.geom().length();
                }
                Ok(loaded >= component.geom().length())
            }
            _ => Ok(true),
        }
    }

    /// Mutable borrows of distinct `ids`, returned in the order given.
    fn disjoint_mut(&mut self, ids: &[ComponentId]) -> RepoResult<Vec<&mut Component>> {
        let mut order: Vec<usize> = (0..ids.len()).collect();
        order.sort_by_key(|&i| ids[i]);
        let mut slots: Vec<Option<&mut Component>> = ids.iter().map(|_| None).collect();
        let mut rest: &mut [Component] = &mut self.nodes;
        let mut offset = 0;
        for i in order {
            let id = ids[i];
            if id.0 < offset {
                return Err(RepoError::Configuration(format!(
                    "component {id} requested twice"
                )));
            }
            let tail = std::mem::take(&mut rest);
            let (node, tail) = tail
                .get_mut(id.0 - offset..)
                .and_then(<[Component]>::split_first_mut)
                .ok_or_else(|| RepoError::Configuration(format!("no component {id}")))?;
            slots[i] = Some(node);
            rest = tail;
            offset = id.0 + 1;
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Pull the daughters' source terms into `id`, then step its model.
    ///
    /// Daughters are drained in the order they were loaded.
    pub fn transport_nuclides(&mut self, id: ComponentId, time: Time) -> RepoResult<()> {
        let node = self.get_mut(id)?;
        let mut model = node.nuclide_model.take().ok_or_else(|| {
            RepoError::NullModel(format!("component {id} has no nuclide model"))
        })?;
        let daughter_ids = node.daughters.clone();

        let pulled = self.disjoint_mut(&daughter_ids).and_then(|nodes| {
            let mut daughters: Vec<&mut dyn NuclideModel> = nodes
                .into_iter()
                .filter_map(|n| n.nuclide_model.as_mut())
                .map(|m| m as &mut dyn NuclideModel)
                .collect();
            model.update_inner_bc(time, &mut daughters)
        });
        if pulled.is_ok() {
            model.transport_nuclides(time);
        }
        self.nodes[id.0].nuclide_model = Some(model);
        pulled
    }

    pub fn transport_heat(&mut self, id: ComponentId, time: Time) -> RepoResult<()> {
        self.get_mut(id)?.transport_heat(time);
        Ok(())
    }
}
