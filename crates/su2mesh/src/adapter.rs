//! Host-facing output adapter.
//!
//! A visualization host pulls data through [`Su2MeshReader`]: it sets a file
//! name, calls [`Su2MeshReader::update`], and reads the two output ports.
//! Assembled structures are handed out behind `Arc`, never recomputed or
//! copied.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use su2mesh_core::{MeshStructure, ReaderOptions, Result, Su2Error};
use su2mesh_structures::{BoundaryCollection, BoundaryPatch, VolumeMesh};

/// The reader's output ports, in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputPort {
    /// Port 0: the full volume mesh.
    VolumeMesh,
    /// Port 1: one block per boundary marker.
    BoundaryMeshes,
}

impl OutputPort {
    /// Every port, by index.
    pub const ALL: [OutputPort; 2] = [OutputPort::VolumeMesh, OutputPort::BoundaryMeshes];

    /// Returns the port index.
    pub fn index(self) -> usize {
        match self {
            OutputPort::VolumeMesh => 0,
            OutputPort::BoundaryMeshes => 1,
        }
    }

    /// Returns the port with the given index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the name the host shows for this port.
    pub fn name(self) -> &'static str {
        match self {
            OutputPort::VolumeMesh => "Volume Mesh",
            OutputPort::BoundaryMeshes => "Boundary Meshes",
        }
    }
}

impl fmt::Display for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compacted boundary patches, one per non-empty marker, in file order.
///
/// Each block is named `marker:<tag>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryBlocks {
    blocks: Vec<BoundaryPatch>,
}

impl BoundaryBlocks {
    /// Builds the blocks for a marker collection.
    pub fn from_collection(boundaries: &BoundaryCollection) -> Self {
        Self {
            blocks: boundaries.compact(),
        }
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no marker produced a block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block at a position.
    pub fn get(&self, index: usize) -> Option<&BoundaryPatch> {
        self.blocks.get(index)
    }

    /// Returns the block for a marker tag (without the `marker:` prefix).
    pub fn find_marker(&self, tag: &str) -> Option<&BoundaryPatch> {
        self.blocks
            .iter()
            .find(|b| b.name().strip_prefix("marker:") == Some(tag))
    }

    /// Returns the block names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name())
    }

    /// Returns an iterator over blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, BoundaryPatch> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a BoundaryBlocks {
    type Item = &'a BoundaryPatch;
    type IntoIter = std::slice::Iter<'a, BoundaryPatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Data available on one output port.
#[derive(Debug, Clone)]
pub enum PortData {
    /// The volume mesh.
    Volume(Arc<VolumeMesh>),
    /// Compacted boundary blocks.
    Blocks(Arc<BoundaryBlocks>),
    /// Markers over the shared point table, when compaction is disabled.
    Markers(Arc<BoundaryCollection>),
}

/// The result of one successful load.
#[derive(Debug, Clone)]
pub struct ReaderOutput {
    volume: Arc<VolumeMesh>,
    boundaries: Arc<BoundaryCollection>,
    blocks: Option<Arc<BoundaryBlocks>>,
}

impl ReaderOutput {
    fn new(volume: VolumeMesh, boundaries: BoundaryCollection, compact: bool) -> Self {
        let blocks = compact.then(|| Arc::new(BoundaryBlocks::from_collection(&boundaries)));
        Self {
            volume: Arc::new(volume),
            boundaries: Arc::new(boundaries),
            blocks,
        }
    }

    /// Returns the volume mesh.
    pub fn volume(&self) -> Arc<VolumeMesh> {
        Arc::clone(&self.volume)
    }

    /// Returns the boundary markers.
    pub fn boundaries(&self) -> Arc<BoundaryCollection> {
        Arc::clone(&self.boundaries)
    }

    /// Returns the compacted boundary blocks, if compaction is enabled.
    pub fn blocks(&self) -> Option<Arc<BoundaryBlocks>> {
        self.blocks.clone()
    }

    /// Returns the data for one port.
    pub fn port(&self, port: OutputPort) -> PortData {
        match port {
            OutputPort::VolumeMesh => PortData::Volume(self.volume()),
            OutputPort::BoundaryMeshes => match self.blocks() {
                Some(blocks) => PortData::Blocks(blocks),
                None => PortData::Markers(self.boundaries()),
            },
        }
    }
}

/// Size and modification time of a file, taken when it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Some(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Pull-based SU2 reader for visualization hosts.
///
/// The reader loads lazily: [`update`](Self::update) parses the file when the
/// file name or options changed, when the file changed on disk, or after
/// [`reload`](Self::reload). Every such parse starts from scratch. A failed
/// load leaves the previous output in place.
///
/// # Example
///
/// ```no_run
/// use su2mesh::{OutputPort, PortData, Su2MeshReader};
///
/// let mut reader = Su2MeshReader::new();
/// reader.set_file_name("naca0012.su2");
/// let output = reader.update()?;
/// if let PortData::Blocks(blocks) = output.port(OutputPort::BoundaryMeshes) {
///     for block in blocks.iter() {
///         println!("{}", su2mesh::MeshStructure::name(block));
///     }
/// }
/// # Ok::<(), su2mesh::Su2Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Su2MeshReader {
    file_name: Option<PathBuf>,
    options: ReaderOptions,
    modified: bool,
    stamp: Option<FileStamp>,
    output: Option<ReaderOutput>,
    load_count: usize,
}

impl Su2MeshReader {
    /// Creates a reader with default options and no file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with the given options.
    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Sets the file to read. Returns true if the name changed.
    ///
    /// Setting the current name again does not mark the reader modified.
    pub fn set_file_name(&mut self, file_name: impl Into<PathBuf>) -> bool {
        let file_name = file_name.into();
        if self.file_name.as_ref() == Some(&file_name) {
            return false;
        }
        log::debug!("reader file name set to {}", file_name.display());
        self.file_name = Some(file_name);
        self.modified = true;
        true
    }

    /// Returns the current file name.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Replaces the reader options. Returns true if they changed.
    pub fn set_options(&mut self, options: ReaderOptions) -> bool {
        if self.options == options {
            return false;
        }
        self.options = options;
        self.modified = true;
        true
    }

    /// Returns the reader options.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Forces the next [`update`](Self::update) to read the file again.
    pub fn reload(&mut self) {
        log::debug!("reader reload requested");
        self.modified = true;
    }

    /// Returns true if the next [`update`](Self::update) will read the file.
    ///
    /// Checks the file's size and modification time against the last load.
    pub fn is_modified(&self) -> bool {
        if self.modified || self.output.is_none() {
            return true;
        }
        match &self.file_name {
            Some(path) => FileStamp::of(path) != self.stamp,
            None => false,
        }
    }

    /// Returns the number of loads attempted so far.
    pub fn load_count(&self) -> usize {
        self.load_count
    }

    /// Brings the output up to date and returns it.
    pub fn update(&mut self) -> Result<&ReaderOutput> {
        let Some(path) = self.file_name.clone() else {
            return Err(Su2Error::IoFailure(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no SU2 file name set",
            )));
        };

        if self.is_modified() {
            self.load_count += 1;
            // Stamped first, so an edit made during the parse is seen next time.
            let stamp = FileStamp::of(&path);
            let (volume, boundaries) = crate::load_with_options(&path, &self.options)?;
            self.stamp = stamp;
            self.output = Some(ReaderOutput::new(
                volume,
                boundaries,
                self.options.compact_boundaries,
            ));
            self.modified = false;
        }

        match &self.output {
            Some(output) => Ok(output),
            None => Err(Su2Error::IoFailure(io::Error::other(
                "reader holds no output",
            ))),
        }
    }

    /// Returns the output of the last successful load.
    pub fn output(&self) -> Option<&ReaderOutput> {
        self.output.as_ref()
    }

    /// Returns the data on a port from the last successful load.
    pub fn port(&self, port: OutputPort) -> Option<PortData> {
        self.output.as_ref().map(|o| o.port(port))
    }
}
