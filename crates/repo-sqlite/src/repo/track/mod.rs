// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::{Track, util::clock::UtcDateTimeSecs};
use setlist_repo::track::*;

use crate::{
    db::track::{models::*, schema::*},
    prelude::*,
};

// SQLite limits the number of host parameters per statement
const LOAD_TRACKS_CHUNK_SIZE: usize = 500;

impl EntityRepo for crate::prelude::Connection<'_> {
    fn insert_track(
        &mut self,
        created_at: UtcDateTimeSecs,
        created_track: &Track,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_track);
        let query = diesel::insert_into(track::table)
            .values(&insertable)
            .returning(track::row_id);
        let row_id = query
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)?;
        Ok(row_id.into())
    }

    fn load_track(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Track)> {
        track::table
            .filter(track::row_id.eq(RowId::from(id)))
            .select(QueryableRecord::as_select())
            .first(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_tracks(&mut self, ids: &[RecordId]) -> RepoResult<Vec<(RecordHeader, Track)>> {
        let mut row_ids = ids.iter().copied().map(RowId::from).collect::<Vec<_>>();
        row_ids.sort_unstable();
        row_ids.dedup();
        let mut loaded = Vec::with_capacity(row_ids.len());
        for chunk in row_ids.chunks(LOAD_TRACKS_CHUNK_SIZE) {
            let records = track::table
                .filter(track::row_id.eq_any(chunk.iter().copied()))
                .select(QueryableRecord::as_select())
                .load(self.as_mut())
                .map_err(repo_error)?;
            loaded.extend(records.into_iter().map(Into::into));
        }
        if loaded.len() < row_ids.len() {
            log::debug!(
                "Loaded only {loaded_count} of {requested_count} requested track(s)",
                loaded_count = loaded.len(),
                requested_count = row_ids.len(),
            );
        }
        Ok(loaded)
    }
}
