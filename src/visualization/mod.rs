//! The particle field instance and its lifecycle.
//!
//! [`FieldVisualization`] owns every buffer. A host drives it with
//! [`tick`](FieldVisualization::tick) once per frame and reads a borrowed
//! [`FrameView`] back for rendering.

pub mod config;
pub mod frame;

pub use config::{FieldConfig, Viewport};
pub use frame::{Background, FieldUniform, Fog, FrameView};

use crate::animation::{EaseSet, EasingConfig};
use crate::core::camera::FieldCamera;
use crate::core::{Error, Result, Vec3};
use crate::field::{update_grid, update_lines, FieldSampler, Grid, GridLayout, LineField, NoiseField};
use crate::params::{FieldParams, ParamId, ParamKind, ParamValue};
use crate::scene::{Scene, SceneDirector};

/// Smallest spacing handed to the grid builder
pub const MIN_SPACING: f32 = 0.01;
/// Smallest area side handed to the grid builder
pub const MIN_AREA: f32 = 0.01;

/// Lifecycle state of a [`FieldVisualization`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    Disposed,
}

/// A running particle field.
pub struct FieldVisualization<S: FieldSampler = NoiseField> {
    params: FieldParams,
    eased: EaseSet,
    sampler: S,
    grid: Grid,
    lines: Option<LineField>,
    camera: FieldCamera,
    viewport: Viewport,
    director: SceneDirector,
    elapsed_ms: f64,
    state: LifecycleState,
}

impl FieldVisualization<NoiseField> {
    /// Build the field with simplex noise. A missing seed is drawn at random.
    pub fn initialize(viewport: Viewport, config: FieldConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Noise seed {}", seed);
        Self::with_sampler(viewport, config, NoiseField::new(seed))
    }
}

impl<S: FieldSampler> FieldVisualization<S> {
    /// Build the field around a caller-supplied sampler.
    pub fn with_sampler(viewport: Viewport, config: FieldConfig, sampler: S) -> Result<Self> {
        let mut params = config.params;
        params.clamp_all();

        let layout = layout_for(&params)?;
        let grid = Grid::build(layout);
        let lines = params.lines_enabled.then(|| LineField::build(&layout));

        let aspect = viewport.aspect().unwrap_or_else(|| {
            log::warn!(
                "Invalid viewport {}x{}, using default aspect",
                viewport.width,
                viewport.height
            );
            FieldCamera::default().aspect
        });
        let camera = FieldCamera::new(Vec3::ZERO, params.cam_fov, aspect);

        let mut director = SceneDirector::new(config.scene.schedule, config.seed);
        director.start(0.0);

        let mut vis = Self {
            eased: EaseSet::new(&params, &config.easing),
            params,
            sampler,
            grid,
            lines,
            camera,
            viewport,
            director,
            elapsed_ms: 0.0,
            state: LifecycleState::Running,
        };
        vis.refresh_field();
        vis.refresh_camera();

        log::info!(
            "Field initialized: {}x{} grid ({} vertices), lines {}, schedule {:?}",
            layout.cols,
            layout.rows,
            vis.grid.len(),
            if vis.lines.is_some() { "on" } else { "off" },
            vis.director.schedule()
        );
        Ok(vis)
    }

    /// Advance to `elapsed_ms` since start.
    ///
    /// Time never runs backwards: an earlier (or non-finite) value is
    /// treated as the last accepted time.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if self.is_disposed() {
            log::debug!("tick after dispose ignored");
            return;
        }
        if elapsed_ms.is_finite() && elapsed_ms > self.elapsed_ms {
            self.elapsed_ms = elapsed_ms;
        }
        let now = self.elapsed_ms;

        if let Some(scene) = self.director.poll(now) {
            self.apply_scene(&scene);
            self.director.complete(now);
        }

        self.refresh_field();
        self.eased.step(&mut self.params);
        self.refresh_camera();
    }

    /// Update the camera aspect. Returns false (and changes nothing) for a
    /// non-positive or non-finite size.
    pub fn on_resize(&mut self, width: f32, height: f32) -> bool {
        if self.is_disposed() {
            log::debug!("resize after dispose ignored");
            return false;
        }
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() || !self.camera.set_aspect(width, height) {
            log::warn!("Rejected resize to {}x{}", width, height);
            return false;
        }
        self.viewport = viewport;
        log::debug!("Resized to {}x{}", width, height);
        true
    }

    /// Set a parameter by name (snake_case or camelCase).
    ///
    /// Numbers are clamped. Eased parameters move immediately, with no
    /// transition. Structural changes rebuild the grid and lines.
    pub fn on_parameter_change(&mut self, name: &str, value: ParamValue) -> Result<()> {
        if self.is_disposed() {
            log::debug!("parameter change after dispose ignored: {}", name);
            return Ok(());
        }
        let id = ParamId::from_name(name).ok_or_else(|| Error::UnknownParameter(name.to_string()))?;
        let changed = self.params.set(id, value)?;

        match id.spec().kind {
            ParamKind::Eased(_) => {
                if let Some(v) = self.params.number(id) {
                    self.eased.jump(id, v);
                }
                self.refresh_camera();
            }
            ParamKind::Structural => {
                if changed {
                    self.rebuild()?;
                }
            }
            ParamKind::Instant => {
                if matches!(id, ParamId::CamNear | ParamId::CamFar) {
                    self.refresh_camera();
                }
            }
        }
        Ok(())
    }

    /// Parse GUI text for `name` and apply it.
    pub fn on_parameter_text(&mut self, name: &str, text: &str) -> Result<()> {
        let id = ParamId::from_name(name).ok_or_else(|| Error::UnknownParameter(name.to_string()))?;
        let value = ParamValue::parse(id.spec(), text)?;
        self.on_parameter_change(id.name(), value)
    }

    /// Draw and apply a scene now, outside the schedule.
    pub fn randomize_scene(&mut self) {
        if self.is_disposed() {
            log::debug!("randomize after dispose ignored");
            return;
        }
        let scene = self.director.request();
        self.apply_scene(&scene);
        self.director.complete(self.elapsed_ms);
    }

    /// Cancel the scene timer and release all buffers. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            log::debug!("dispose called twice");
            return;
        }
        self.director.cancel();
        self.grid.clear();
        self.lines = None;
        self.state = LifecycleState::Disposed;
        log::info!(
            "Field disposed after {} scenes, {:.0} ms",
            self.director.scenes_played(),
            self.elapsed_ms
        );
    }

    /// Borrowed render state for the current frame
    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            positions: self.grid.positions(),
            color_ratios: self.grid.color_ratios(),
            lines: self.lines.as_ref().map(|l| l.vertices()),
            camera: &self.camera,
            background: Background::from_params(&self.params),
            fog: Fog::from_params(&self.params),
            uniform: FieldUniform::new(&self.params, self.elapsed_ms),
            elapsed_ms: self.elapsed_ms,
        }
    }

    fn apply_scene(&mut self, scene: &Scene) {
        let mut rebuild = false;
        for &(id, value) in &scene.assignments {
            match id.spec().kind {
                ParamKind::Eased(_) => {
                    if let Some(v) = value.as_number() {
                        self.eased.set_target(id, v);
                    }
                }
                ParamKind::Structural => match self.params.set(id, value) {
                    Ok(changed) => rebuild |= changed,
                    Err(e) => log::warn!("Scene skipped {}: {}", id, e),
                },
                ParamKind::Instant => {
                    if let Err(e) = self.params.set(id, value) {
                        log::warn!("Scene skipped {}: {}", id, e);
                    }
                }
            }
        }
        if rebuild {
            if let Err(e) = self.rebuild() {
                log::warn!("Grid rebuild failed: {}", e);
            }
        }
        log::info!(
            "Scene {}: {}x{} area, spacing {:.3}, colors {} / {}",
            self.director.scenes_played() + 1,
            self.params.particle_area_w,
            self.params.particle_area_h,
            self.params.particle_spacing,
            self.params.color_a,
            self.params.color_b
        );
    }

    /// Rebuild grid and lines from the current structural parameters.
    fn rebuild(&mut self) -> Result<()> {
        let layout = layout_for(&self.params)?;
        self.grid = Grid::build(layout);
        self.lines = self.params.lines_enabled.then(|| LineField::build(&layout));
        self.refresh_field();
        log::debug!(
            "Rebuilt grid {}x{}: {} vertices, {} edges",
            layout.cols,
            layout.rows,
            self.grid.len(),
            self.lines.as_ref().map_or(0, |l| l.len())
        );
        Ok(())
    }

    fn refresh_field(&mut self) {
        update_grid(&mut self.grid, &self.params, &self.sampler, self.elapsed_ms);
        if let Some(lines) = &mut self.lines {
            update_lines(lines, &self.grid, self.params.color_a, self.params.color_b);
        }
    }

    fn refresh_camera(&mut self) {
        let p = &self.params;
        self.camera.position = Vec3::new(p.cam_x, p.cam_y, p.cam_z);
        self.camera.fov_degrees = p.cam_fov;
        self.camera.near = p.cam_near;
        self.camera.far = p.cam_far;
    }

    #[inline]
    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    #[inline]
    pub fn eased(&self) -> &EaseSet {
        &self.eased
    }

    /// Change easing rates without disturbing current values or targets.
    pub fn set_easing(&mut self, config: &EasingConfig) {
        self.eased.set_rates(config);
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn lines(&self) -> Option<&LineField> {
        self.lines.as_ref()
    }

    #[inline]
    pub fn camera(&self) -> &FieldCamera {
        &self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn director(&self) -> &SceneDirector {
        &self.director
    }

    #[inline]
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.state == LifecycleState::Disposed
    }
}

fn layout_for(params: &FieldParams) -> Result<GridLayout> {
    GridLayout::new(
        params.particle_area_w.max(MIN_AREA),
        params.particle_area_h.max(MIN_AREA),
        params.particle_spacing.max(MIN_SPACING),
    )
}
