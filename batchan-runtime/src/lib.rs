// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for the batchan aggregator.
//!
//! The aggregator never talks to an executor's timer API directly; it asks a
//! [`Runtime`](runtime::Runtime) for its [`Timer`](timer::Timer) and polls the
//! sleep futures that timer hands out.

pub mod impls;
pub mod runtime;
pub mod timer;
