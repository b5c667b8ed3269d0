// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    track (row_id) {
        row_id -> BigInt,
        row_created_at -> BigInt,
        row_updated_at -> BigInt,
        title -> Text,
        artist -> Nullable<Text>,
        album -> Nullable<Text>,
        duration_ms -> Nullable<BigInt>,
    }
}
