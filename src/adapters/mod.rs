use crate::domain::model::{Size, TextDirection};
use crate::domain::ports::HostSurface;

/// In-memory host surface recording the layout calls it receives. Backs the
/// CLI and tests; real toolkits provide their own `HostSurface`.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    display: Size,
    preferred: Size,
    minimum: Size,
    direction: TextDirection,
    pack_count: usize,
}

impl HeadlessSurface {
    pub fn new(display: Size) -> Self {
        Self {
            display,
            preferred: Size::new(0, 0),
            minimum: Size::new(0, 0),
            direction: TextDirection::default(),
            pack_count: 0,
        }
    }

    pub fn minimum_size(&self) -> Size {
        self.minimum
    }

    pub fn text_direction(&self) -> TextDirection {
        self.direction
    }

    pub fn pack_count(&self) -> usize {
        self.pack_count
    }
}

impl HostSurface for HeadlessSurface {
    fn display_bounds(&self) -> Size {
        self.display
    }

    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn set_preferred_size(&mut self, size: Size) {
        self.preferred = size;
    }

    fn set_minimum_size(&mut self, size: Size) {
        self.minimum = size;
    }

    fn apply_text_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
    }

    fn pack(&mut self) {
        self.pack_count += 1;
    }

    fn size(&self) -> Size {
        if self.pack_count > 0 {
            self.preferred
        } else {
            Size::new(0, 0)
        }
    }
}
