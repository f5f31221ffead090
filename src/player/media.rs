// Copyright (C) 2026  Playdeck Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The media source seam and its MPV-backed production implementation.
//!
//! [`MediaSource`] is the opaque playback capability the controller drives:
//! load/play/pause/seek/volume plus a polled stream of lifecycle events.
//! [`MpvSource`] implements it with `libmpv` (null video output, property
//! observation), keeping the handle on the main thread so state reads are
//! authoritative and synchronous.

use mpv::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum MediaError {
    #[error("no source has been set")]
    NoSource,
    #[error("media backend error: {0}")]
    Backend(#[from] mpv::Error),
}

/// Asynchronous notifications from the media backend.
///
/// These arrive at the backend's own pace; after a track switch, events for
/// the previous source stop once the new load is issued, but handlers must
/// still read current state fresh rather than capture it when a transition
/// is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MediaEvent {
    /// Metadata for the current source is available.
    MetadataLoaded,
    /// Duration became known or changed, in seconds.
    DurationChanged(f64),
    /// Playback position changed, in seconds.
    TimeChanged(f64),
    /// The current source played to its natural end.
    Ended,
}

/// The opaque playback capability consumed by the controller.
pub(crate) trait MediaSource {
    /// Points the source at a new locator; takes effect on the next `load`.
    fn set_source(&mut self, uri: &str);

    /// (Re)loads the current source, leaving it paused.
    fn load(&mut self) -> Result<(), MediaError>;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self) -> Result<(), MediaError>;

    /// Authoritative paused flag, read from the backend rather than cached.
    fn paused(&self) -> bool;

    fn position(&self) -> Option<f64>;

    fn set_position(&mut self, seconds: f64) -> Result<(), MediaError>;

    /// Duration of the current source in seconds, `None` until metadata is
    /// known.
    fn duration(&self) -> Option<f64>;

    /// Sets the output volume, 0.0 to 1.0.
    fn set_volume(&mut self, level: f64) -> Result<(), MediaError>;

    /// Drains any pending backend events.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

/// `libmpv`-backed media source.
pub(crate) struct MpvSource {
    handler: mpv::MpvHandler,
    source: Option<String>,
}

impl MpvSource {
    pub(crate) fn new() -> Result<Self, MediaError> {
        let mut builder = mpv::MpvHandlerBuilder::new()?;
        builder.set_option("vo", "null")?;
        let mut handler = builder.build()?;

        handler.observe_property::<f64>("duration", 0)?;
        handler.observe_property::<f64>("time-pos", 0)?;

        Ok(Self {
            handler,
            source: None,
        })
    }
}

impl MediaSource for MpvSource {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
    }

    fn load(&mut self) -> Result<(), MediaError> {
        let source = self.source.clone().ok_or(MediaError::NoSource)?;
        self.handler.command(&["loadfile", &source, "replace"])?;
        // mpv starts playing a loaded file by default, the controller decides
        // whether to resume.
        self.handler.set_property("pause", true)?;
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.handler.set_property("pause", false)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.handler.set_property("pause", true)?;
        Ok(())
    }

    fn paused(&self) -> bool {
        self.handler.get_property::<bool>("pause").unwrap_or(true)
    }

    fn position(&self) -> Option<f64> {
        self.handler
            .get_property::<f64>("time-pos")
            .ok()
            .filter(|p| p.is_finite())
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.handler
            .command(&["seek", &seconds.to_string(), "absolute"])?;
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.handler
            .get_property::<f64>("duration")
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    fn set_volume(&mut self, level: f64) -> Result<(), MediaError> {
        // mpv volume is a 0-100 percentage
        self.handler
            .set_property("volume", (level * 100.0).clamp(0.0, 100.0))?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        while let Some(mpv_event) = self.handler.wait_event(0.0) {
            match mpv_event {
                mpv::Event::FileLoaded => events.push(MediaEvent::MetadataLoaded),

                mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                    ("duration", Format::Double(duration)) if duration > 0.0 => {
                        events.push(MediaEvent::DurationChanged(duration));
                    }
                    ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                        events.push(MediaEvent::TimeChanged(seconds));
                    }
                    _ => {}
                },

                mpv::Event::EndFile(result) => {
                    if let Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) = result {
                        events.push(MediaEvent::Ended);
                    }
                }

                _ => {}
            }
        }

        events
    }
}
