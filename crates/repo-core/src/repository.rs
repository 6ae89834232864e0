// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Generic Repository
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Facility driver: accepts waste, conditions it into waste forms, packages
//! the forms, loads packages into buffers along the drift and steps every
//! component from the innermost outward.
//!
//! Layout along the facility:
//! - the far field spans the whole facility, centred at `(x/2, y/2, z/2)`;
//! - buffers are laid side by side in y, `dy` apart, each `x` long;
//! - packages sit `dx` apart along a buffer;
//! - waste forms share their package's centroid and length.

use crate::component::{Component, ComponentId, ComponentTree, ComponentType};
use crate::report::ReportSink;
use repo_types::config::{ComponentConfig, RepositoryConfig};
use repo_types::error::{RepoError, RepoResult};
use repo_types::geometry::Point3;
use repo_types::mat_data::MatDataTable;
use repo_types::material::{Time, WasteBatch};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Waste offered to the repository, tagged with its commodity.
pub type WasteStream = (WasteBatch, String);

/// Request for material issued on a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub commodity: String,
    /// [kg]
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct Repository {
    name: String,
    x: f64,
    y: f64,
    z: f64,
    dx: f64,
    dy: f64,
    dz: f64,
    advective_velocity: f64,
    capacity: f64,
    inventory_size: f64,
    lifetime: i64,
    start_year: i32,
    start_month: u32,
    incommodities: VecDeque<String>,

    buffer_template: Component,
    wf_templates: Vec<Component>,
    wp_templates: Vec<Component>,
    /// Commodity → index into `wf_templates`.
    commod_wf: BTreeMap<String, usize>,
    /// Waste form name → index into `wp_templates`.
    wf_wp: BTreeMap<String, usize>,

    tree: ComponentTree,
    far_field: ComponentId,
    stocks: VecDeque<WasteStream>,
    inventory: Vec<WasteStream>,
    current_waste_forms: Vec<ComponentId>,
    current_waste_packages: VecDeque<ComponentId>,
    waste_forms: Vec<ComponentId>,
    waste_packages: Vec<ComponentId>,
    buffers: Vec<ComponentId>,
    is_full: bool,
}

fn expect_type(cfg: &ComponentConfig, expected: ComponentType) -> RepoResult<()> {
    let found = ComponentType::from_name(&cfg.component_type)?;
    if found != expected {
        return Err(RepoError::Configuration(format!(
            "template '{}' is a {found} component, expected {expected}",
            cfg.name
        )));
    }
    Ok(())
}

impl Repository {
    pub fn from_file(path: &str) -> RepoResult<Self> {
        Self::from_config(&RepositoryConfig::from_file(path)?)
    }

    /// Build the facility and its templates. The far field exists from the
    /// start but is only placed on the first tick.
    pub fn from_config(cfg: &RepositoryConfig) -> RepoResult<Self> {
        cfg.validate()?;
        let materials: BTreeMap<String, Arc<MatDataTable>> = cfg
            .materials
            .iter()
            .map(|m| (m.name.clone(), Arc::new(m.clone())))
            .collect();

        expect_type(&cfg.far_field, ComponentType::FarField)?;
        expect_type(&cfg.buffer, ComponentType::Buffer)?;
        let far_field_template = Component::from_config(&cfg.far_field, &materials)?;
        let buffer_template = Component::from_config(&cfg.buffer, &materials)?;

        let mut wf_templates = Vec::with_capacity(cfg.waste_forms.len());
        let mut commod_wf = BTreeMap::new();
        for wf_cfg in &cfg.waste_forms {
            expect_type(wf_cfg, ComponentType::WasteForm)?;
            for commodity in &wf_cfg.allowed_commodities {
                commod_wf.insert(commodity.clone(), wf_templates.len());
            }
            wf_templates.push(Component::from_config(wf_cfg, &materials)?);
        }

        let mut wp_templates = Vec::with_capacity(cfg.waste_packages.len());
        let mut wf_wp = BTreeMap::new();
        for wp_cfg in &cfg.waste_packages {
            expect_type(wp_cfg, ComponentType::WastePackage)?;
            for wf_name in &wp_cfg.allowed_waste_forms {
                if wf_templates.iter().any(|wf| wf.name() == wf_name) {
                    wf_wp.insert(wf_name.clone(), wp_templates.len());
                } else {
                    log::warn!(
                        "waste package '{}' allows unknown waste form '{wf_name}'",
                        wp_cfg.name
                    );
                }
            }
            wp_templates.push(Component::from_config(wp_cfg, &materials)?);
        }
        if let Some(orphan) = wf_templates.iter().find(|wf| !wf_wp.contains_key(wf.name())) {
            return Err(RepoError::Configuration(format!(
                "waste form '{}' has no matching waste package",
                orphan.name()
            )));
        }

        let mut tree = ComponentTree::new();
        let far_field = tree.add(far_field_template.fresh_copy(0)?);
        log::debug!(
            "repository '{}': {} waste form and {} waste package templates",
            cfg.name,
            wf_templates.len(),
            wp_templates.len()
        );

        Ok(Repository {
            name: cfg.name.clone(),
            x: cfg.x,
            y: cfg.y,
            z: cfg.z,
            dx: cfg.dx,
            dy: cfg.dy,
            dz: cfg.dz,
            advective_velocity: cfg.advective_velocity,
            capacity: cfg.capacity,
            inventory_size: cfg.inventory_size,
            lifetime: cfg.lifetime,
            start_year: cfg.start_year,
            start_month: cfg.start_month,
            incommodities: cfg.incommodities.iter().cloned().collect(),
            buffer_template,
            wf_templates,
            wp_templates,
            commod_wf,
            wf_wp,
            tree,
            far_field,
            stocks: VecDeque::new(),
            inventory: Vec::new(),
            current_waste_forms: Vec::new(),
            current_waste_packages: VecDeque::new(),
            waste_forms: Vec::new(),
            waste_packages: Vec::new(),
            buffers: Vec::new(),
            is_full: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn advective_velocity(&self) -> f64 {
        self.advective_velocity
    }

    pub fn lifetime(&self) -> i64 {
        self.lifetime
    }

    /// `(year, month)` the facility starts operating.
    pub fn start_date(&self) -> (i32, u32) {
        (self.start_year, self.start_month)
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn far_field(&self) -> ComponentId {
        self.far_field
    }

    pub fn buffers(&self) -> &[ComponentId] {
        &self.buffers
    }

    pub fn waste_forms(&self) -> &[ComponentId] {
        &self.waste_forms
    }

    /// Packages already loaded into a buffer.
    pub fn waste_packages(&self) -> &[ComponentId] {
        &self.waste_packages
    }

    /// Packages still waiting for buffer space.
    pub fn pending_waste_packages(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.current_waste_packages.iter().copied()
    }

    /// True once every buffer slot along y is taken and full.
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Mass already emplaced [kg].
    pub fn inventory_mass(&self) -> f64 {
        self.inventory.iter().map(|(b, _)| b.mass()).sum()
    }

    /// Mass received but not yet emplaced [kg].
    pub fn stocks_mass(&self) -> f64 {
        self.stocks.iter().map(|(b, _)| b.mass()).sum()
    }

    /// Amount to request this step: the per-step capacity, or the space
    /// left in the inventory if smaller. Never negative.
    pub fn capacity(&self) -> f64 {
        let space = self.inventory_size - self.inventory_mass() - self.stocks_mass();
        self.capacity.min(space).max(0.0)
    }

    /// Receive waste of `commodity` into the stocks.
    pub fn add_waste(&mut self, batch: WasteBatch, commodity: &str) -> RepoResult<()> {
        if !self.commod_wf.contains_key(commodity) {
            return Err(RepoError::Configuration(format!(
                "commodity '{commodity}' has no matching waste form in repository '{}'",
                self.name
            )));
        }
        log::debug!(
            "repository '{}' received {:.6e} kg of {commodity}",
            self.name,
            batch.mass()
        );
        self.stocks.push_back((batch, commodity.to_string()));
        Ok(())
    }

    /// Place the far field on the first step, then request the next
    /// commodity in rotation.
    pub fn handle_tick(
        &mut self,
        time: Time,
        sink: &mut dyn ReportSink,
    ) -> RepoResult<Option<Request>> {
        if time == 0 {
            self.set_placement(self.far_field, sink)?;
        }
        let Some(commodity) = self.incommodities.pop_front() else {
            return Ok(None);
        };
        self.incommodities.push_back(commodity.clone());
        let amount = self.capacity();
        if amount <= 0.0 {
            return Ok(None);
        }
        log::trace!("t={time}: '{}' requests {amount} kg of {commodity}", self.name);
        Ok(Some(Request { commodity, amount }))
    }

    /// Emplace waste, then step heat and nuclide transport and report the
    /// contaminant state of every component.
    pub fn handle_tock(&mut self, time: Time, sink: &mut dyn ReportSink) -> RepoResult<()> {
        self.emplace_waste(time, sink)?;
        self.transport_heat(time)?;
        self.transport_nuclides(time)?;
        self.update_contaminant_table(time, sink)
    }

    /// Components in transport order: waste forms, packages, buffers, far field.
    pub fn transport_order(&self) -> Vec<ComponentId> {
        let mut order = Vec::with_capacity(
            self.waste_forms.len() + self.waste_packages.len() + self.buffers.len() + 1,
        );
        order.extend_from_slice(&self.waste_forms);
        order.extend_from_slice(&self.waste_packages);
        order.extend_from_slice(&self.buffers);
        order.push(self.far_field);
        order
    }

    fn emplace_waste(&mut self, time: Time, sink: &mut dyn ReportSink) -> RepoResult<()> {
        while let Some(stream) = self.stocks.pop_front() {
            self.condition_waste(&stream, time)?;
            self.inventory.push(stream);
        }

        let conditioned = std::mem::take(&mut self.current_waste_forms);
        for &wf in &conditioned {
            self.package_waste(wf, time)?;
        }
        self.waste_forms.extend(conditioned);

        for _ in 0..self.current_waste_packages.len() {
            let Some(wp) = self.current_waste_packages.pop_front() else {
                break;
            };
            let loaded = self.tree.is_full(wp)? && self.load_buffer(wp, time, sink)?.is_some();
            if loaded {
                self.waste_packages.push(wp);
            } else {
                self.current_waste_packages.push_back(wp);
            }
        }
        Ok(())
    }

    /// Put a waste stream into a new waste form of the kind its commodity maps to.
    pub fn condition_waste(&mut self, stream: &WasteStream, time: Time) -> RepoResult<ComponentId> {
        let (batch, commodity) = stream;
        let template = self
            .commod_wf
            .get(commodity)
            .map(|&i| &self.wf_templates[i])
            .ok_or_else(|| {
                RepoError::Configuration(format!(
                    "commodity '{commodity}' has no matching waste form"
                ))
            })?;
        let mut wf = template.fresh_copy(time)?;
        wf.absorb(batch.clone());
        let id = self.tree.add(wf);
        self.current_waste_forms.push(id);
        Ok(id)
    }

    /// Load a waste form into a package, reusing a pending package of the
    /// right kind while it has room.
    pub fn package_waste(&mut self, wf: ComponentId, time: Time) -> RepoResult<ComponentId> {
        let wf_name = self.tree.get(wf)?.name().to_string();
        let template = self
            .wf_wp
            .get(&wf_name)
            .map(|&i| &self.wp_templates[i])
            .ok_or_else(|| {
                RepoError::Configuration(format!(
                    "waste form '{wf_name}' has no matching waste package"
                ))
            })?;

        let mut reusable = None;
        for &wp in &self.current_waste_packages {
            let node = self.tree.get(wp)?;
            if node.name() == template.name() && !self.tree.is_full(wp)? {
                reusable = Some(wp);
                break;
            }
        }
        let wp = match reusable {
            Some(wp) => wp,
            None => {
                let wp = self.tree.add(template.fresh_copy(time)?);
                self.current_waste_packages.push_back(wp);
                wp
            }
        };
        self.tree.load(wp, wf)?;
        Ok(wp)
    }

    /// Load a package into the current buffer, opening a new buffer when the
    /// current one is full. Returns the buffer, or `None` once the facility
    /// has no room left.
    pub fn load_buffer(
        &mut self,
        wp: ComponentId,
        time: Time,
        sink: &mut dyn ReportSink,
    ) -> RepoResult<Option<ComponentId>> {
        let current = match self.buffers.last() {
            Some(&b) if !self.tree.is_full(b)? => Some(b),
            _ => None,
        };
        let buffer = match current {
            Some(b) => b,
            None if (self.buffers.len() as f64) * self.dy < self.y => {
                let b = self.tree.add(self.buffer_template.fresh_copy(time)?);
                self.buffers.push(b);
                self.tree.load(self.far_field, b)?;
                self.set_placement(b, sink)?;
                b
            }
            None => {
                if !self.is_full {
                    log::warn!("repository '{}' is full at t={time}", self.name);
                }
                self.is_full = true;
                return Ok(None);
            }
        };

        self.tree.load(buffer, wp)?;
        self.set_placement(wp, sink)?;
        let daughters = self.tree.get(wp)?.daughters().to_vec();
        for wf in daughters {
            self.set_placement(wf, sink)?;
        }
        Ok(Some(buffer))
    }

    /// Position a component according to its type and report it.
    pub fn set_placement(&mut self, id: ComponentId, sink: &mut dyn ReportSink) -> RepoResult<()> {
        let component = self.tree.get(id)?;
        let parent = || {
            component.parent().ok_or_else(|| {
                RepoError::Configuration(format!(
                    "{} component '{}' must be loaded before placement",
                    component.component_type(),
                    component.name()
                ))
            })
        };
        let (centroid, length) = match component.component_type() {
            ComponentType::FarField => (
                Point3::new(self.x / 2.0, self.y / 2.0, self.z / 2.0),
                self.x,
            ),
            ComponentType::Buffer => {
                let slot = self
                    .buffers
                    .iter()
                    .position(|&b| b == id)
                    .unwrap_or(self.buffers.len());
                (
                    Point3::new(self.x / 2.0, (slot as f64 + 0.5) * self.dy, self.dz),
                    self.x,
                )
            }
            ComponentType::WastePackage => {
                let buffer = self.tree.get(parent()?)?;
                let slot = buffer
                    .daughters()
                    .iter()
                    .position(|&d| d == id)
                    .unwrap_or(buffer.daughters().len());
                (
                    Point3::new((slot as f64 + 0.5) * self.dx, buffer.y(), buffer.z()),
                    self.dx,
                )
            }
            ComponentType::WasteForm => {
                let package = self.tree.get(parent()?)?;
                (package.geom().centroid(), package.geom().length())
            }
        };
        let component = self.tree.get_mut(id)?;
        component.set_placement(centroid, length);
        sink.add_component_row(component.component_row());
        Ok(())
    }

    fn transport_heat(&mut self, time: Time) -> RepoResult<()> {
        for id in self.transport_order() {
            self.tree.transport_heat(id, time)?;
        }
        Ok(())
    }

    fn transport_nuclides(&mut self, time: Time) -> RepoResult<()> {
        for id in self.transport_order() {
            self.tree.transport_nuclides(id, time)?;
        }
        Ok(())
    }

    fn update_contaminant_table(&self, time: Time, sink: &mut dyn ReportSink) -> RepoResult<()> {
        for id in self.transport_order() {
            self.tree.get(id)?.update_contaminant_table(time, sink);
        }
        Ok(())
    }

    /// Total mass held by every placed or pending component [kg].
    pub fn contained_mass(&self) -> f64 {
        self.tree.iter().map(|c| c.contained_mass()).sum()
    }
}
