//! Gallery track layout – artwork records and slot/offset math.
//!
//! The track is a horizontal strip of equally spaced slots.  Each artwork
//! occupies one slot; scrolling slides the whole strip past the viewport.
//! Offsets are normalized to [0,1] over the full track length, so the layout
//! is the single authority for converting a slot index into a scroll target.

use thiserror::Error;

// ───────────────────────────────────────── artwork ───────────

/// One line of descriptive body text — plain, or a labelled link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Text(String),
    Link { text: String, url: String },
}

impl BodyLine {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Media kind for a detail item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Aspect hint for presenting a detail item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// One item in an artwork's detail carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailMedia {
    pub kind: MediaKind,
    pub source: String,
    pub alt_text: Option<String>,
    pub orientation: Orientation,
}

/// A single piece on the track.
///
/// Missing descriptive fields simply render nothing; an empty `detail_media`
/// suppresses the "view work" affordance.  Neither is an error.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub id: String,
    /// Integer position along the track.  Unique, strictly increasing in
    /// display order.
    pub slot: u32,
    /// Non-interactive pieces (the title card, the work-in-progress tile)
    /// cannot be selected or inspected.
    pub interactive: bool,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub body: Vec<BodyLine>,
    pub detail_media: Vec<DetailMedia>,
}

impl Artwork {
    pub fn has_detail_media(&self) -> bool {
        !self.detail_media.is_empty()
    }
}

// ───────────────────────────────────────── layout ────────────

/// World-space distance between adjacent slots (wide viewports).
pub const MODULE_SPACING_WIDE: f32 = 19.5;
/// Tighter spacing for narrow viewports.
pub const MODULE_SPACING_NARROW: f32 = 14.0;

/// Index into [`GalleryLayout::artworks`].
pub type ArtworkIx = usize;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("gallery has no artworks")]
    Empty,
    #[error("duplicate or non-increasing slot {slot} (artwork `{id}`)")]
    SlotOrder { slot: u32, id: String },
}

/// Static layout of the track, resolved once at startup.
///
/// The viewport-width branch picks the spacing constant set at construction
/// time and is deliberately not re-evaluated afterwards, matching the
/// observed behaviour of the site this reimplements.
#[derive(Debug, Clone)]
pub struct GalleryLayout {
    artworks: Vec<Artwork>,
    module_spacing: f32,
    first_slot: u32,
    last_slot: u32,
}

impl GalleryLayout {
    /// Build a layout from an ordered artwork list.
    ///
    /// The track extends one slot past the last artwork to make room for the
    /// non-interactive work-in-progress tile, so `last_slot` already
    /// includes it when the tile is present in `artworks`.
    pub fn new(artworks: Vec<Artwork>, module_spacing: f32) -> Result<Self, LayoutError> {
        let first_slot = artworks.first().map(|a| a.slot).ok_or(LayoutError::Empty)?;
        for pair in artworks.windows(2) {
            if pair[1].slot <= pair[0].slot {
                return Err(LayoutError::SlotOrder {
                    slot: pair[1].slot,
                    id: pair[1].id.clone(),
                });
            }
        }
        let last_slot = artworks.last().map_or(first_slot, |a| a.slot);
        Ok(Self {
            artworks,
            module_spacing,
            first_slot,
            last_slot,
        })
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn artwork(&self, ix: ArtworkIx) -> Option<&Artwork> {
        self.artworks.get(ix)
    }

    pub fn module_spacing(&self) -> f32 {
        self.module_spacing
    }

    /// Total world-space track length: `module_spacing × (last − first)`.
    pub fn total_track_length(&self) -> f32 {
        self.module_spacing * (self.last_slot - self.first_slot) as f32
    }

    /// Normalized scroll offset that centers the given artwork, clamped to
    /// [0,1].  An artwork whose natural offset lies outside the track (the
    /// clamp actually bit) may never be reachable by the smoothed offset —
    /// callers own that liveness concern.
    pub fn target_offset(&self, ix: ArtworkIx) -> Option<f32> {
        let art = self.artworks.get(ix)?;
        let total = self.total_track_length();
        if total <= 0.0 {
            return Some(0.0);
        }
        let raw = art.slot as f32 * self.module_spacing / total;
        Some(raw.clamp(0.0, 1.0))
    }

    /// World-space X of a slot relative to the track origin.
    pub fn slot_x(&self, slot: u32) -> f32 {
        slot as f32 * self.module_spacing
    }

    /// Index of the first interactive artwork, if any (used by
    /// auto-focus-on-mount).
    pub fn first_interactive(&self) -> Option<ArtworkIx> {
        self.artworks.iter().position(|a| a.interactive)
    }

    /// Interactive artwork whose target offset is nearest to `offset`.
    pub fn nearest_interactive(&self, offset: f32) -> Option<ArtworkIx> {
        let mut best: Option<(ArtworkIx, f32)> = None;
        for (ix, art) in self.artworks.iter().enumerate() {
            if !art.interactive {
                continue;
            }
            let Some(target) = self.target_offset(ix) else {
                continue;
            };
            let dist = (target - offset).abs();
            match best {
                Some((_, d)) if d <= dist => {}
                _ => best = Some((ix, dist)),
            }
        }
        best.map(|(ix, _)| ix)
    }
}

// ───────────────────────────────────────── built-in catalog ──

/// The built-in exhibition, mirroring the portfolio this tool presents.
/// The title card and the trailing work-in-progress tile are part of the
/// track but not selectable.
pub fn builtin_artworks() -> Vec<Artwork> {
    vec![
        Artwork {
            id: "title".into(),
            slot: 0,
            interactive: false,
            heading: None,
            subheading: None,
            body: vec![BodyLine::link(
                "Instagram",
                "https://www.instagram.com/jake__leong/",
            )],
            detail_media: Vec::new(),
        },
        Artwork {
            id: "labrum-nomoli".into(),
            slot: 1,
            interactive: true,
            heading: Some("Labrum London".into()),
            subheading: Some("3D Artist / Animator".into()),
            body: vec![
                BodyLine::link("AW25 Animation", "https://www.instagram.com/p/DGYA8GYIflD/"),
                BodyLine::link(
                    "Africa Day Animation",
                    "https://www.instagram.com/p/DKuWungIQX_/",
                ),
            ],
            detail_media: vec![
                DetailMedia {
                    kind: MediaKind::Video,
                    source: "media/labrum-aw25.mp4".into(),
                    alt_text: Some("Labrum AW25 runway animation".into()),
                    orientation: Orientation::Portrait,
                },
                DetailMedia {
                    kind: MediaKind::Image,
                    source: "media/labrum-nomoli.png".into(),
                    alt_text: Some("Nomoli sculpture study".into()),
                    orientation: Orientation::Landscape,
                },
            ],
        },
        Artwork {
            id: "mowalola".into(),
            slot: 2,
            interactive: true,
            heading: Some("Mowalola Video".into()),
            subheading: Some("3D Artist / Art direction".into()),
            body: vec![BodyLine::text("Links to view work")],
            detail_media: vec![DetailMedia {
                kind: MediaKind::Video,
                source: "media/mowalola.mp4".into(),
                alt_text: None,
                orientation: Orientation::Landscape,
            }],
        },
        Artwork {
            id: "distorted-realities-01".into(),
            slot: 3,
            interactive: true,
            heading: Some("Distorted Realities #1".into()),
            subheading: Some("Central Saint Martins - MA Final Project".into()),
            body: vec![BodyLine::text("Link to video")],
            detail_media: vec![DetailMedia {
                kind: MediaKind::Video,
                source: "media/distorted-realities-01.mp4".into(),
                alt_text: None,
                orientation: Orientation::Landscape,
            }],
        },
        Artwork {
            id: "distorted-realities-02".into(),
            slot: 4,
            interactive: true,
            heading: Some("Distorted Realities #2".into()),
            subheading: Some("Central Saint Martins - MA Final Project".into()),
            body: vec![BodyLine::text("Link to video")],
            detail_media: Vec::new(),
        },
        // Trailing tile hinting at future work.  Always one slot past the
        // last real artwork.
        Artwork {
            id: "wip".into(),
            slot: 5,
            interactive: false,
            heading: None,
            subheading: None,
            body: Vec::new(),
            detail_media: Vec::new(),
        },
    ]
}
