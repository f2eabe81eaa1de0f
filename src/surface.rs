//! Choosing a surface (EGL) configuration.

/// Requested bit depths.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
    pub depth: u32,
    pub stencil: u32,
}

impl Default for SurfaceSpec {
    /// 8 bits per color channel, no depth or stencil.
    fn default() -> Self {
        Self {
            red: 8,
            green: 8,
            blue: 8,
            alpha: 8,
            depth: 0,
            stencil: 0,
        }
    }
}

/// Attributes reported for one available config. `None` means the platform
/// did not report the attribute and it counts as zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ConfigAttribs {
    pub red: Option<u32>,
    pub green: Option<u32>,
    pub blue: Option<u32>,
    pub alpha: Option<u32>,
    pub depth: Option<u32>,
    pub stencil: Option<u32>,
}

impl ConfigAttribs {
    pub fn rgba(red: u32, green: u32, blue: u32, alpha: u32) -> Self {
        Self {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            alpha: Some(alpha),
            ..Default::default()
        }
    }

    pub fn with_depth_stencil(mut self, depth: u32, stencil: u32) -> Self {
        self.depth = Some(depth);
        self.stencil = Some(stencil);
        self
    }

    fn satisfies(&self, spec: &SurfaceSpec) -> bool {
        let get = |v: Option<u32>| v.unwrap_or(0);
        if get(self.depth) < spec.depth || get(self.stencil) < spec.stencil {
            return false;
        }
        get(self.red) == spec.red
            && get(self.green) == spec.green
            && get(self.blue) == spec.blue
            && get(self.alpha) == spec.alpha
    }
}

/// Index of the first config with at least the requested depth and stencil
/// and exactly the requested color bits.
pub fn choose_config(spec: &SurfaceSpec, configs: &[ConfigAttribs]) -> Option<usize> {
    let chosen = configs.iter().position(|c| c.satisfies(spec));
    match chosen {
        Some(i) => log::debug!("surface config {i} matches {spec:?}"),
        None => log::warn!("no surface config among {} matches {spec:?}", configs.len()),
    }
    chosen
}
