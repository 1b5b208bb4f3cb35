pub mod clock;
pub mod controller;
pub mod input_adapter;
pub mod timer;
pub mod window;

pub use clock::{Clock, Stopwatch};
pub use controller::{Controller, CursorMode, Key, MouseButton, PushEvent, PushEventKind};
pub use input_adapter::WinitController;
pub use timer::{FpsCounter, Throttled};
pub use window::WindowDimensions;
