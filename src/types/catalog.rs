//! Brick catalogs: which shapes may be used in which colours.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BrickError, Result};

use super::{BrickColour, Colour, PieceShape};

/// One colour of a catalog and its allowed shapes in priority order.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub colour: BrickColour,
    pub shapes: Vec<PieceShape>,
}

impl CatalogEntry {
    /// Whether this colour can always cover a lone cell.
    pub fn has_unit_piece(&self) -> bool {
        self.shapes.contains(&PieceShape::UNIT)
    }
}

/// An immutable mapping from colours to allowed shapes.
///
/// Colours keep their declaration order, and each colour's shape list is
/// stored in priority order, most preferred first.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub name: String,
    entries: Vec<CatalogEntry>,
    index: HashMap<Colour, usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a colour with its shapes, builder style.
    pub fn with_colour(mut self, colour: BrickColour, shapes: impl Into<Vec<PieceShape>>) -> Self {
        self.add(colour, shapes);
        self
    }

    /// Add a colour with its shapes.
    ///
    /// A repeated colour value is kept in `entries()` for validation, but
    /// lookups resolve to the first declaration.
    pub fn add(&mut self, colour: BrickColour, shapes: impl Into<Vec<PieceShape>>) {
        self.index.entry(colour.value()).or_insert(self.entries.len());
        self.entries.push(CatalogEntry {
            colour,
            shapes: shapes.into(),
        });
    }

    /// Look up the entry for an exact colour value.
    pub fn entry(&self, colour: &Colour) -> Option<&CatalogEntry> {
        self.index.get(colour).map(|&i| &self.entries[i])
    }

    /// Allowed shapes for a colour, most preferred first.
    pub fn shapes_for(&self, colour: &Colour) -> Option<&[PieceShape]> {
        self.entry(colour).map(|e| e.shapes.as_slice())
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// All colours in declaration order.
    pub fn colours(&self) -> impl Iterator<Item = &BrickColour> {
        self.entries.iter().map(|e| &e.colour)
    }

    /// Distinct colour values, the palette images are quantized to.
    pub fn palette(&self) -> Vec<Colour> {
        let mut palette: Vec<Colour> = Vec::with_capacity(self.index.len());
        for entry in &self.entries {
            if !palette.contains(&entry.colour.value()) {
                palette.push(entry.colour.value());
            }
        }
        palette
    }

    /// Number of colours.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BrickError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read catalog: {}", e),
        })?;

        let fallback = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom");
        Self::parse(&content, fallback)
    }

    /// Parse a catalog from a YAML string.
    ///
    /// ```yaml
    /// name: greys
    /// colours:
    ///   - name: Black
    ///     value: "#1B2A34"
    ///     shapes: [2x4, 1x2, 1x1]
    /// ```
    pub fn parse(content: &str, fallback_name: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content).map_err(|e| BrickError::Parse {
            message: format!("Invalid catalog: {}", e),
            help: Some("Check catalog YAML syntax".to_string()),
        })?;

        let mut catalog = Catalog::new(file.name.unwrap_or_else(|| fallback_name.to_string()));
        for def in file.colours {
            let value = Colour::from_hex(&def.value)?;
            let shapes = def
                .shapes
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<PieceShape>>>()?;
            catalog.add(BrickColour::new(def.name, value), shapes);
        }

        Ok(catalog)
    }

    /// Resolve a catalog by builtin name or file path.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if let Some(catalog) = BuiltinCatalogs::get(name_or_path) {
            return Ok(catalog);
        }

        let path = PathBuf::from(name_or_path);
        if path.exists() {
            return Self::load(&path);
        }

        Err(BrickError::Build {
            message: format!("Catalog not found: {}", name_or_path),
            help: Some(format!(
                "Use one of the builtin catalogs ({}) or provide a path",
                BuiltinCatalogs::NAMES.join(", ")
            )),
        })
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    name: Option<String>,
    colours: Vec<ColourDef>,
}

#[derive(Deserialize)]
struct ColourDef {
    name: String,
    value: String,
    shapes: Vec<String>,
}

/// The builtin brick catalogs.
///
/// Colour names and values follow the classic brick colour guide; every
/// colour here is available as a 1x1 brick, so any image can be built.
pub struct BuiltinCatalogs;

impl BuiltinCatalogs {
    pub const NAMES: [&'static str; 3] = ["basic", "advanced", "all"];

    /// The five common shapes, largest first.
    pub const BASIC_SHAPES: [PieceShape; 5] = [
        PieceShape::new(2, 4),
        PieceShape::new(2, 2),
        PieceShape::new(1, 4),
        PieceShape::new(1, 2),
        PieceShape::new(1, 1),
    ];

    /// Get a builtin catalog by name.
    pub fn get(name: &str) -> Option<Catalog> {
        match name {
            "basic" => Some(Self::basic()),
            "advanced" => Some(Self::advanced()),
            "all" => Some(Self::all()),
            _ => None,
        }
    }

    /// Eight staple colours in every basic shape.
    pub fn basic() -> Catalog {
        let mut catalog = Catalog::new("basic");
        add_basic(&mut catalog);
        catalog
    }

    /// The rarer colours, some with a reduced shape range.
    pub fn advanced() -> Catalog {
        let mut catalog = Catalog::new("advanced");
        add_advanced(&mut catalog);
        catalog
    }

    /// Basic followed by advanced.
    pub fn all() -> Catalog {
        let mut catalog = Catalog::new("all");
        add_basic(&mut catalog);
        add_advanced(&mut catalog);
        catalog
    }
}

fn add_basic(catalog: &mut Catalog) {
    const COLOURS: [(&str, Colour); 8] = [
        ("White (#1)", Colour::rgb(242, 243, 242)),
        ("Bright red (#21)", Colour::rgb(196, 40, 27)),
        ("Bright blue (#23)", Colour::rgb(13, 105, 171)),
        ("Black (#26)", Colour::rgb(27, 42, 52)),
        ("Dark green (#28)", Colour::rgb(40, 127, 70)),
        ("Bright yellow (#24)", Colour::rgb(245, 205, 47)),
        ("Brick yellow (#5)", Colour::rgb(215, 197, 153)),
        ("Bright orange (#106)", Colour::rgb(218, 133, 64)),
    ];
    for (name, value) in COLOURS {
        catalog.add(BrickColour::new(name, value), BuiltinCatalogs::BASIC_SHAPES);
    }
}

fn add_advanced(catalog: &mut Catalog) {
    const COLOURS: [(&str, Colour); 5] = [
        ("Dark stone grey (#199)", Colour::rgb(99, 95, 97)),
        ("Reddish brown (#192)", Colour::rgb(105, 64, 39)),
        ("Medium stone grey (#194)", Colour::rgb(163, 162, 164)),
        ("Bright yellowish green (#119)", Colour::rgb(164, 189, 70)),
        ("Light purple (#222)", Colour::rgb(228, 173, 200)),
    ];
    for (name, value) in COLOURS {
        catalog.add(BrickColour::new(name, value), BuiltinCatalogs::BASIC_SHAPES);
    }

    catalog.add(
        BrickColour::new("Medium blue (#102)", Colour::rgb(110, 153, 201)),
        [PieceShape::new(1, 4), PieceShape::new(1, 2), PieceShape::UNIT],
    );
    catalog.add(
        BrickColour::new("Bright reddish violet (#124)", Colour::rgb(146, 57, 120)),
        [PieceShape::new(1, 2), PieceShape::UNIT],
    );
}
