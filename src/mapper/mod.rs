//! # Mapper Module
//!
//! Lowers the extractor's [`SchemaModel`](crate::extractor::SchemaModel) into a
//! [`ServiceModel`]: the resources to serve, their fields in target-language types and five
//! synthesized CRUD operations each.
//!
//! ## Operations
//!
//! For a resource `CalendarEvent`:
//!
//! | Operation | Method | Route | Input | Output |
//! |-----------|--------|-------|-------|--------|
//! | `getCalendarEvent` | GET | `/calendar-events/:id` | `GetCalendarEventRequest` | `CalendarEvent` |
//! | `listCalendarEvents` | GET | `/calendar-events` | `ListCalendarEventRequest` | `ListCalendarEventResult` |
//! | `createCalendarEvent` | POST | `/calendar-events` | `CreateCalendarEventRequest` | `CalendarEvent` |
//! | `updateCalendarEvent` | PUT | `/calendar-events/:id` | `UpdateCalendarEventRequest` | `CalendarEvent` |
//! | `deleteCalendarEvent` | DELETE | `/calendar-events/:id` | `DeleteCalendarEventRequest` | `DeleteCalendarEventResult` |
//!
//! Templates rely on these names verbatim.

mod map;
mod model;
mod scalars;

pub use map::{synthesize_operations, MapperConfig, ResourceMapper, DEFAULT_SERVICE_NAME};
pub use model::{
    HttpMethod, MappedField, MappedOperation, MappedResource, MappedType, OperationKind,
    ServiceModel,
};
pub use scalars::{map_scalar, map_type, ScalarMapping};
