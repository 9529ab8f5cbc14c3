// node.rs — Node allocator
//
// A Node is the in-memory record for one filesystem entry under
// consideration: its path, its OS attribute bitmask, a back reference to
// its parent, and the atomic child counter that is the single point of
// truth for "has every descendant been accounted for". allocate() is the
// only way nodes enter the system; free_and_get_parent() is the only way
// they leave it (see worker::counter_walk).
//
// Ownership model: the parent reference is an Arc clone, which keeps the
// parent's storage alive while any descendant might still touch it during
// its counter-walk. This is *not* the mechanism that decides when a node
// is freed — that is decided exclusively by the children_remaining atomic
// transitioning to zero (I4). Arc refcounting here plays the role the
// original's raw, non-owning back-pointer played in an unmanaged heap.

use std::ffi::OsString;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::logging::log_debug;
use crate::termination::TerminationSignal;

pub const FILE_ATTRIBUTE_READONLY: u32 = 0x0000_0001;
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x0000_0010;

pub struct Node {
    pub children_remaining: AtomicI64,
    pub parent: Option<Arc<Node>>,
    pub attributes: u32,
    pub path: PathBuf,
}

impl Node {
    pub fn is_directory(&self) -> bool {
        (self.attributes & FILE_ATTRIBUTE_DIRECTORY) != 0
    }

    pub fn is_readonly(&self) -> bool {
        (self.attributes & FILE_ATTRIBUTE_READONLY) != 0
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  allocate
//
//  Join parent's path with `name`, capture `attributes`, and set the
//  self-tick (I1). Returns None on allocation failure, after recording the
//  failure and raising the termination signal — callers treat a None as
//  "skip this branch" (see §7 allocation-failure propagation policy).
//
////////////////////////////////////////////////////////////////////////////////

pub fn allocate(
    parent: Option<Arc<Node>>,
    attributes: u32,
    name: &std::ffi::OsStr,
    term: &TerminationSignal,
) -> Option<Arc<Node>> {
    let parent_path: Option<&Path> = parent.as_deref().map(|n| n.path.as_path());

    let path = match try_join_path(parent_path, name) {
        Ok(p) => p,
        Err(()) => {
            log_debug!("allocate: out of memory building path for {:?}", name);
            term.raise();
            return None;
        }
    };

    Some(Arc::new(Node {
        children_remaining: AtomicI64::new(1),
        parent,
        attributes,
        path,
    }))
}

////////////////////////////////////////////////////////////////////////////////
//
//  free_and_get_parent
//
//  Releases the caller's handle on `node` and returns its parent. Storage
//  is actually reclaimed once the last Arc reference (this one, typically
//  the only one by this point) drops.
//
////////////////////////////////////////////////////////////////////////////////

pub fn free_and_get_parent(node: Arc<Node>) -> Option<Arc<Node>> {
    node.parent.clone()
}

////////////////////////////////////////////////////////////////////////////////
//
//  try_join_path
//
//  Builds `parent\name` as a fallible Vec<u16> reservation — the one
//  allocation on this path whose failure is observable on stable Rust
//  without relying on a custom global allocator (Arc::new's own
//  allocation is not recoverable here; see DESIGN.md).
//
////////////////////////////////////////////////////////////////////////////////

fn try_join_path(parent: Option<&Path>, name: &std::ffi::OsStr) -> Result<PathBuf, ()> {
    let parent_wide: Vec<u16> = parent
        .map(|p| p.as_os_str().encode_wide().collect())
        .unwrap_or_default();
    let name_wide: Vec<u16> = name.encode_wide().collect();

    let separator = if parent_wide.is_empty() { 0 } else { 1 };
    let needed = parent_wide.len() + separator + name_wide.len();

    let mut wide: Vec<u16> = Vec::new();
    wide.try_reserve_exact(needed).map_err(|_| ())?;

    wide.extend_from_slice(&parent_wide);
    if separator == 1 {
        wide.push(b'\\' as u16);
    }
    wide.extend_from_slice(&name_wide);

    Ok(PathBuf::from(OsString::from_wide(&wide)))
}
