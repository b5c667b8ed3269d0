// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::{AtomicBool, Ordering};

use setlist_core::playlist::Position;
use setlist_repo::{
    playlist::{EntryRepo, RecordId},
    prelude::*,
    track::RecordId as TrackId,
};

/// A single modification of the entries of a playlist
///
/// All positions refer to the state of the playlist at the time
/// the operation is applied, i.e. after all preceding operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOperation {
    RemoveAll,
    Remove { positions: Vec<Position> },
    Append { track_ids: Vec<TrackId> },
    Move { from: Position, to: Position },
}

/// Apply the operations in order
///
/// The abort flag is checked before each operation. The caller is
/// responsible for rolling back the enclosing transaction on failure.
pub fn patch<Repo>(
    repo: &mut Repo,
    playlist_id: RecordId,
    operations: impl IntoIterator<Item = PatchOperation>,
    abort_flag: &AtomicBool,
) -> RepoResult<()>
where
    Repo: EntryRepo + ?Sized,
{
    for operation in operations {
        if abort_flag.load(Ordering::Relaxed) {
            log::info!("Aborting update of playlist {playlist_id}");
            return Err(RepoError::Aborted);
        }
        #[allow(clippy::enum_glob_use)]
        use PatchOperation::*;
        match operation {
            RemoveAll => {
                repo.remove_all_playlist_entries(playlist_id)?;
            }
            Remove { positions } => {
                if positions.is_empty() {
                    continue;
                }
                repo.remove_playlist_entries(playlist_id, &positions)?;
            }
            Append { track_ids } => {
                if track_ids.is_empty() {
                    continue;
                }
                repo.append_playlist_entries(playlist_id, &track_ids)?;
            }
            Move { from, to } => {
                repo.move_playlist_entry(playlist_id, from, to)?;
            }
        }
    }
    Ok(())
}
