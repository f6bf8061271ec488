//! Placement of composite widgets
//!
//! Composite widgets are placed by their outermost widget. Implementors route
//! every geometry call there, so callers never place an inner widget by
//! accident.

use themed_core::{GridOptions, PackOptions, PlaceOptions, Placement};

use crate::host::Host;
use crate::Result;

/// Geometry manager calls for a widget that may be made of several
pub trait Geometry {
    fn pack(&self, host: &mut Host, options: PackOptions) -> Result<()>;

    fn grid(&self, host: &mut Host, options: GridOptions) -> Result<()>;

    fn place(&self, host: &mut Host, options: PlaceOptions) -> Result<()>;

    /// Remove from whichever manager placed it
    fn forget(&self, host: &mut Host) -> Result<()>;

    fn placement<'h>(&self, host: &'h Host) -> Option<&'h Placement>;
}
