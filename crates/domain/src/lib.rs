// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod email;
mod error;
mod money;
mod pay_period;
mod role;
mod status;
mod validation;

pub use email::EmailAddress;
pub use error::DomainError;
pub use money::Money;
pub use pay_period::PayPeriod;
pub use role::SystemRole;
pub use status::{EmployeeStatus, LeaveStatus, PayrollStatus};
pub use validation::validate_employee_fields;
