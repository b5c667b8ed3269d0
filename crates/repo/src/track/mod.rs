// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::{Track, util::clock::UtcDateTimeSecs};

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

/// Access to the external track catalog
pub trait EntityRepo {
    fn insert_track(
        &mut self,
        created_at: UtcDateTimeSecs,
        created_track: &Track,
    ) -> RepoResult<RecordId>;

    fn load_track(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Track)>;

    /// Load multiple tracks at once
    ///
    /// The order of the results is unspecified. Duplicate ids are
    /// loaded only once and unknown ids are skipped.
    fn load_tracks(&mut self, ids: &[RecordId]) -> RepoResult<Vec<(RecordHeader, Track)>>;
}
