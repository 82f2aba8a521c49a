//! Native surface backends
//!
//! - **`headless`**: in-memory surfaces that behave like a well-mannered
//!   toolkit (operations report the callbacks a real window manager would).
//!   Used by the test suite and by hosts without a display.
//! - **`glfw`**: real top-level windows through GLFW, behind the
//!   `glfw-backend` feature.

#[cfg(feature = "glfw-backend")]
pub mod glfw;
pub mod headless;

#[cfg(feature = "glfw-backend")]
pub use self::glfw::{GlfwSurface, GlfwSurfaceFactory};
pub use headless::{HeadlessSurface, HeadlessSurfaceFactory};
