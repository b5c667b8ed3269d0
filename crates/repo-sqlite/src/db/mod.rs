// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod playlist;
pub(crate) mod playlist_entry;
pub(crate) mod track;

mod join {
    use crate::db::{playlist::schema::*, playlist_entry::schema::*, track::schema::*};

    diesel::allow_tables_to_appear_in_same_query!(playlist, playlist_entry, track);
}
