// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use setlist_core::Track;
use setlist_repo::track::{RecordHeader, RecordId};
use setlist_usecases as uc;

use crate::prelude::*;

/// Add a track to the catalog
pub async fn create(db_gatekeeper: &Gatekeeper, new_track: Track) -> Result<RecordId> {
    let validated_input = uc::track::validate_input(new_track)?;
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::track::create(connection, &validated_input)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn load_one(db_gatekeeper: &Gatekeeper, id: RecordId) -> Result<(RecordHeader, Track)> {
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            setlist_usecases_sqlite::track::load_one(&mut pooled_connection, id)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
