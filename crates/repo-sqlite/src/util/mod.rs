// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Positions are stored as signed integers
pub(crate) fn position_to_sql(position: usize) -> i64 {
    debug_assert!(i64::try_from(position).is_ok());
    position as i64
}

pub(crate) fn position_from_sql(position: i64) -> usize {
    debug_assert!(position >= 0);
    position as usize
}
