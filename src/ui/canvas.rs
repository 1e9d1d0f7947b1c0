use font8x8::UnicodeFonts;

/// Glyph cell size of the bitmap font.
const GLYPH: i32 = 8;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    pub const YELLOW: Self = Self(0xff, 0xff, 0x00);
    pub const PRIMARY: Self = Self(0x60, 0x02, 0xee);
    pub const PRIMARY_LIGHT: Self = Self(0x99, 0x46, 0xff);
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)` in framebuffer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }
    pub fn width(&self) -> i32 {
        (self.x1 - self.x0).max(0)
    }
    pub fn height(&self) -> i32 {
        (self.y1 - self.y0).max(0)
    }
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Some(Self::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        ))
        .filter(|r| !r.is_empty())
    }
}

/// From an RFB `(x, y, width, height)` request.
impl From<(u16, u16, u16, u16)> for Rect {
    fn from((x, y, w, h): (u16, u16, u16, u16)) -> Self {
        let (x, y) = (i32::from(x), i32::from(y));
        Self::new(x, y, x + i32::from(w), y + i32::from(h))
    }
}

/// Pixel buffer covering one requested region of the framebuffer.
/// All drawing is in framebuffer coordinates and clipped to the region,
/// so the same layout code can render any sub-rectangle.
#[derive(Debug, Clone)]
pub struct Canvas {
    area: Rect,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(area: Rect, background: Rgb) -> Self {
        Self {
            area,
            pixels: vec![background; area.width() as usize * area.height() as usize],
        }
    }
    /// Row-major pixels of the region.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.area
            .contains(x, y)
            .then(|| self.pixels[self.index(x, y)])
    }
    pub fn fill(&mut self, rect: Rect, color: Rgb) {
        if let Some(clip) = rect.intersect(&self.area) {
            for y in clip.y0..clip.y1 {
                let row = self.index(clip.x0, y);
                self.pixels[row..row + clip.width() as usize].fill(color);
            }
        }
    }
    /// Left-aligned, vertically centred text clipped to `rect`.
    pub fn label(&mut self, rect: Rect, text: &str, color: Rgb) {
        let top = rect.y0 + (rect.height() - GLYPH) / 2;
        self.text(rect, rect.x0, top, text, color);
    }
    /// Horizontally and vertically centred text clipped to `rect`.
    pub fn caption(&mut self, rect: Rect, text: &str, color: Rgb) {
        let width = text.chars().count() as i32 * GLYPH;
        let left = rect.x0 + (rect.width() - width) / 2;
        let top = rect.y0 + (rect.height() - GLYPH) / 2;
        self.text(rect, left, top, text, color);
    }
    fn text(&mut self, clip: Rect, left: i32, top: i32, text: &str, color: Rgb) {
        let Some(clip) = clip.intersect(&self.area) else {
            return;
        };
        for (i, glyph) in text
            .chars()
            .map(|c| font8x8::BASIC_FONTS.get(c).unwrap_or([0; 8]))
            .enumerate()
        {
            let x0 = left + i as i32 * GLYPH;
            for (dy, bits) in glyph.iter().enumerate() {
                for dx in 0..GLYPH {
                    let (x, y) = (x0 + dx, top + dy as i32);
                    if bits & (1 << dx) != 0 && clip.contains(x, y) {
                        let i = self.index(x, y);
                        self.pixels[i] = color;
                    }
                }
            }
        }
    }
    fn index(&self, x: i32, y: i32) -> usize {
        ((y - self.area.y0) * self.area.width() + (x - self.area.x0)) as usize
    }
}
