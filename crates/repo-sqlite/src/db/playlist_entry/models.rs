// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::playlist::Position;
use setlist_repo::{
    playlist::{Entry, RecordId as PlaylistId},
    track::RecordId as TrackId,
};

use crate::{prelude::*, util::*};

use super::schema::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) position: i64,
    pub(crate) track_id: RowId,
}

impl From<QueryableRecord> for Entry {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord { position, track_id } = from;
        Self {
            position: position_from_sql(position),
            track_id: track_id.into(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = playlist_entry)]
pub(crate) struct InsertableRecord {
    pub(crate) playlist_id: RowId,
    pub(crate) position: i64,
    pub(crate) track_id: RowId,
}

impl InsertableRecord {
    pub(crate) fn bind(playlist_id: PlaylistId, position: Position, track_id: TrackId) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            position: position_to_sql(position),
            track_id: track_id.into(),
        }
    }
}
