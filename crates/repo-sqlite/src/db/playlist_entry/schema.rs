// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::{playlist::schema::playlist, track::schema::track};

diesel::table! {
    playlist_entry (playlist_id, position) {
        playlist_id -> BigInt,
        position -> BigInt,
        track_id -> BigInt,
    }
}

diesel::joinable!(playlist_entry -> playlist (playlist_id));
diesel::joinable!(playlist_entry -> track (track_id));
