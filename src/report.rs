use core::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::convert::GeometryBuffer;
use crate::core::geometry::GeometryType;

/// Summary of a finished conversion, derived only from the final counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeometryInfo {
    pub geometry_type: GeometryType,
    pub num_points: usize,
    /// Zero for point clouds.
    pub num_faces: usize,
    pub num_attributes: usize,
    pub loaded_color: bool,
    pub loaded_normal: bool,
    pub loaded_tex_coord: bool,
}

impl GeometryInfo {
    pub fn new(buffer: &GeometryBuffer, num_attributes: usize) -> Self {
        Self {
            geometry_type: buffer.geometry_type,
            num_points: buffer.num_points(),
            num_faces: buffer.num_faces(),
            num_attributes,
            loaded_color: buffer.has_colors(),
            loaded_normal: buffer.has_normals(),
            loaded_tex_coord: buffer.has_tex_coords(),
        }
    }
}

impl fmt::Display for GeometryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.geometry_type.is_mesh() {
            writeln!(f, "Number of faces loaded: {}.", self.num_faces)?;
        }
        writeln!(f, "Number of points loaded: {}.", self.num_points)?;
        writeln!(f, "Number of attributes loaded: {}.", self.num_attributes)?;
        if self.loaded_color {
            writeln!(f, "Loaded color attribute.")?;
        }
        if self.loaded_normal {
            writeln!(f, "Loaded normal attribute.")?;
        }
        if self.loaded_tex_coord {
            writeln!(f, "Loaded texture coordinate attribute.")?;
        }
        Ok(())
    }
}

/// Wall-clock time spent in each synchronous stage of a decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DecodeTimings {
    /// Classification plus the external decoder.
    pub decode: Duration,
    /// Attribute extraction, buffer building and index reconstruction.
    pub convert: Duration,
}

impl fmt::Display for DecodeTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decode: {:?} convert: {:?}", self.decode, self.convert)
    }
}

#[derive(Clone, Debug)]
pub enum Report<'a> {
    Classified(GeometryType),
    Decoded {
        info: &'a GeometryInfo,
        timings: DecodeTimings,
    },
}

/// Receives status from the decode pipeline. Implementations decide where it goes.
pub trait ReportSink {
    fn report(&self, report: &Report<'_>);
}

impl<F> ReportSink for F
    where F: Fn(&Report<'_>)
{
    fn report(&self, report: &Report<'_>) {
        self(report)
    }
}

/// Forwards reports to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, report: &Report<'_>) {
        match report {
            Report::Classified(geometry_type) => {
                tracing::info!("Loaded a {}.", geometry_type);
            }
            Report::Decoded { info, timings } => {
                tracing::info!(
                    points = info.num_points,
                    faces = info.num_faces,
                    attributes = info.num_attributes,
                    "{}{}",
                    info, timings
                );
            }
        }
    }
}

/// Drops every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ReportSink for NoopSink {
    fn report(&self, _report: &Report<'_>) {}
}
