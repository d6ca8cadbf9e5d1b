//! # ncocc Process Identity (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! `occ` refuses to run (or corrupts file ownership) when it is not executed
//! as the user owning the Nextcloud installation. This module reads the owner
//! of a file and switches the **whole process** to that user.
//!
//! ## Safety of the identity switch
//!
//! [`switch_identity`] calls `setgid` followed by `setuid`. Once it succeeds the
//! process cannot regain its previous identity, and the change applies to every
//! thread. It must run strictly before the child process is spawned and must not
//! race with unrelated work in the same process. Supplementary groups are left
//! untouched.
//!
use std::{fs::Metadata, io, os::unix::fs::MetadataExt};
use tracing::debug;

/// User and group owning a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOwner {
    pub uid: u32,
    pub gid: u32,
}

impl From<&Metadata> for FileOwner {
    fn from(metadata: &Metadata) -> Self {
        FileOwner {
            uid: metadata.uid(),
            gid: metadata.gid(),
        }
    }
}

/// Real user id of the current process.
pub fn current_uid() -> u32 {
    // SAFETY: getuid has no preconditions and cannot fail.
    unsafe { libc::getuid() }
}

/// Irreversibly switches the process group id and user id to `owner`.
///
/// The group is changed first; after `setuid` the process would no longer have
/// the privilege to do so.
///
/// ## Errors
///
/// Returns the OS error (typically `EPERM`) from whichever call failed. If
/// `setgid` succeeded and `setuid` failed, the group change stays in effect.
pub fn switch_identity(owner: FileOwner) -> io::Result<()> {
    debug!("Switching to gid {} and uid {}", owner.gid, owner.uid);
    // SAFETY: plain syscalls on integer ids; failures are reported via errno.
    if unsafe { libc::setgid(owner.gid) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: as above.
    if unsafe { libc::setuid(owner.uid) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
