// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Settings of the overlapped execution demo.
//!
//! The demo schedules a configurable compute workload next to the graphics work and
//! draws a timeline of both.  Its settings only drive host-side behavior, so none of them
//! are shader constants and the packed constant buffer is empty.

use crate::annotation::Annotation;
use crate::schema::{FieldDef, GroupDef, Member};
use crate::value::Literal;

pub const MAX_WORKLOAD_ELEMENTS: u32 = 1024 * 256;
pub const MAX_WORKLOAD_ITERATIONS: u32 = 128;
pub const WORKLOAD_GROUP_SIZE: u32 = 1024;
pub const WORKLOAD_RT_WIDTH: u32 = WORKLOAD_GROUP_SIZE;
pub const MAX_WORKLOAD_GROUPS: u32 = MAX_WORKLOAD_ELEMENTS / WORKLOAD_GROUP_SIZE;

/// Shader register the settings constant buffer binds to.
pub const CBUFFER_REGISTER: u32 = 12;

pub const ENABLE_VSYNC: &str = "General.EnableVSync";
pub const TIMELINE_ZOOM: &str = "General.TimelineZoom";
pub const USE_SPLIT_BARRIERS: &str = "General.UseSplitBarriers";
pub const STABLE_POWER_STATE: &str = "General.StablePowerState";
pub const USE_HI_PRIORITY_COMPUTE_QUEUE: &str = "General.UseHiPriorityComputeQueue";
pub const SHOW_WORKLOAD_UI: &str = "General.ShowWorkloadUI";

pub const GENERAL: GroupDef = GroupDef {
    name: "General",
    annotations: &[Annotation::ExpandGroup(true)],
    members: &[
        Member::Field(FieldDef {
            name: "EnableVSync",
            default: Literal::Bool(true),
            annotations: &[
                Annotation::UseAsShaderConstant(false),
                Annotation::DisplayName("Enable VSync"),
                Annotation::HelpText("Enables or disables vertical sync during Present"),
            ],
        }),
        Member::Field(FieldDef {
            name: "TimelineZoom",
            default: Literal::Float(1.0),
            annotations: &[
                Annotation::UseAsShaderConstant(false),
                Annotation::MinValue(1.0),
                Annotation::MaxValue(16.0),
            ],
        }),
        Member::Field(FieldDef {
            name: "UseSplitBarriers",
            default: Literal::Bool(false),
            annotations: &[Annotation::UseAsShaderConstant(false)],
        }),
        Member::Field(FieldDef {
            name: "StablePowerState",
            default: Literal::Bool(false),
            annotations: &[Annotation::UseAsShaderConstant(false)],
        }),
        Member::Field(FieldDef {
            name: "UseHiPriorityComputeQueue",
            default: Literal::Bool(false),
            annotations: &[Annotation::UseAsShaderConstant(false)],
        }),
        Member::Field(FieldDef {
            name: "ShowWorkloadUI",
            default: Literal::Bool(true),
            annotations: &[Annotation::UseAsShaderConstant(false)],
        }),
    ],
};

pub const SETTINGS: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[Member::Group(GENERAL)],
};
