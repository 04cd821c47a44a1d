//! Domain entities for the VAIO control panel.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from file-system APIs, UI toolkits, or async runtimes.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the rules are tiny: which files exist, which bit of the lid bitmask
//! belongs to which checkbox, which thermal profile may be offered.  Keeping
//! them in one place means the sysfs adapter and the UI bridge never have to
//! agree on magic numbers by convention.

/// The catalogue of kernel-exposed attribute files.
pub mod attribute;

/// UI control identifiers and the value transforms between UI and file.
pub mod controls;
