//! Resources for Booker API version 4.1.
//!
//! # Models
//!
//! - [`Appointment`] - A booked appointment
//! - [`Customer`] / [`CustomerDetails`] - A customer record and its personal fields
//! - [`Employee`] - A staff member
//! - [`Treatment`] - A bookable service
//! - [`Location`] - A spa or salon location
//! - [`LocationDaySchedule`] - Opening hours for one weekday
//! - [`OnlineBookingSettings`] / [`FeatureSettings`] - Per-location settings
//!
//! Shared value types: [`NamedRef`], [`Address`], [`Money`].
//!
//! # Endpoints
//!
//! - [`Merchant`] - Merchant-scoped endpoints (locations, appointments,
//!   customers, orders)
//! - [`ListOptions`] - Paging options for list endpoints

mod appointment;
mod common;
mod customer;
mod employee;
mod location;
mod merchant;
mod treatment;

pub use appointment::Appointment;
pub use common::{booker_datetime, Address, Money, NamedRef};
pub use customer::{Customer, CustomerDetails, DEFAULT_CUSTOMER_FIELDS};
pub use employee::Employee;
pub use location::{FeatureSettings, Location, LocationDaySchedule, OnlineBookingSettings};
pub use merchant::{ListOptions, Merchant};
pub use treatment::Treatment;
