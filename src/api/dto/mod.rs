//! Request DTOs of the HTTP surface

pub mod timeseries_dto;
