// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use crate::prelude::*;

/// Zero-based index of an entry within a playlist
///
/// The positions of a playlist with _n_ entries are always
/// contiguous, i.e. `0..n`.
pub type Position = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playlist {
    /// Mandatory, non-empty name.
    pub name: String,

    /// Optional free text.
    pub description: Option<String>,

    /// Visibility, new playlists are public.
    pub public: bool,
}

impl Playlist {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            public: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaylistInvalidity {
    NameEmpty,
}

impl Validate for Playlist {
    type Invalidity = PlaylistInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { name, .. } = self;
        ValidationContext::new()
            .invalidate_if(name.trim().is_empty(), Self::Invalidity::NameEmpty)
            .into()
    }
}

/// Aggregated properties of all entries
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntriesSummary {
    pub tracks_count: usize,

    /// Sum of all known track durations.
    pub duration: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaylistWithEntriesSummary {
    pub playlist: Playlist,
    pub entries: EntriesSummary,
}
