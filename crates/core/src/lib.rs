// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod util;

pub mod track;
pub use self::track::Track;

pub mod playlist;
pub use self::playlist::{EntriesSummary, Playlist, PlaylistWithEntriesSummary};

pub mod prelude {
    pub(crate) use semval::prelude::*;
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};
}
