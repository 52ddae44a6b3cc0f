use super::*;

mod normalization;
mod pipeline;
