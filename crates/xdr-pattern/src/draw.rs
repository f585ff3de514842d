//! Draw lists.
//!
//! Generators do not touch pixels. They return a [`DrawList`] of
//! commands in paint order, which [`crate::raster`] or a UI layer turns
//! into output.

use xdr_core::Rect;

/// Vertical placement of a label inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered horizontally, top edge.
    Top,
    /// Centered horizontally, bottom edge.
    Bottom,
}

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface with an RGBA value.
    Clear([f32; 4]),
    /// Opaque grey fill. `luma` is in the frame's encoding.
    Fill {
        /// Area to fill
        rect: Rect,
        /// Grey level
        luma: f32,
    },
    /// Text on a dark box, drawn by the UI layer.
    Label {
        /// Label text
        text: String,
        /// Box the label is centered in
        bounds: Rect,
        /// Top or bottom of `bounds`
        anchor: Anchor,
        /// Font size in device pixels
        font_size: f32,
    },
    /// The reference image composite, scaled into `rect`.
    Image {
        /// Destination rectangle
        rect: Rect,
    },
}

/// Paint-ordered list of commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list with room for `n` commands.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            commands: Vec::with_capacity(n),
        }
    }

    /// Appends a command.
    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    /// Appends a grey fill.
    pub fn fill(&mut self, rect: Rect, luma: f32) {
        self.push(DrawCommand::Fill { rect, luma });
    }

    /// Appends a label.
    pub fn label(&mut self, text: impl Into<String>, bounds: Rect, anchor: Anchor, font_size: f32) {
        self.push(DrawCommand::Label {
            text: text.into(),
            bounds,
            anchor,
            font_size,
        });
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Fill commands as `(rect, luma)`.
    pub fn fills(&self) -> impl Iterator<Item = (&Rect, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { rect, luma } => Some((rect, *luma)),
            _ => None,
        })
    }

    /// Label commands as `(text, anchor)`.
    pub fn labels(&self) -> impl Iterator<Item = (&str, Anchor)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, anchor, .. } => Some((text.as_str(), *anchor)),
            _ => None,
        })
    }
}

impl IntoIterator for DrawList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
