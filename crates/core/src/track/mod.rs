// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use crate::prelude::*;

/// A track of the external catalog as far as playlists are concerned
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub title: String,

    pub artist: Option<String>,

    pub album: Option<String>,

    /// Playback duration, unknown if `None`.
    pub duration: Option<Duration>,
}

impl Track {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: None,
            album: None,
            duration: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackInvalidity {
    TitleEmpty,
    ArtistEmpty,
    AlbumEmpty,
}

impl Validate for Track {
    type Invalidity = TrackInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title,
            artist,
            album,
            duration: _,
        } = self;
        ValidationContext::new()
            .invalidate_if(title.trim().is_empty(), Self::Invalidity::TitleEmpty)
            .invalidate_if(
                artist.as_deref().is_some_and(|artist| artist.trim().is_empty()),
                Self::Invalidity::ArtistEmpty,
            )
            .invalidate_if(
                album.as_deref().is_some_and(|album| album.trim().is_empty()),
                Self::Invalidity::AlbumEmpty,
            )
            .into()
    }
}
