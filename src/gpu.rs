// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Uploads a settings constant buffer with wgpu.

[`ConstantBuffer`] owns a uniform buffer sized from a [`ConstantBufferLayout`] and a CPU
staging copy.  Call [`ConstantBuffer::update`] once per frame; it refills the staging copy
in place and schedules a `write_buffer`, which wgpu orders before the next submission.

An empty layout still gets a single-register buffer, since zero-sized uniform buffers
cannot be bound.
*/

use crate::layout::{CONSTANT_BUFFER_ALIGNMENT, ConstantBufferLayout};
use crate::store::ValueSource;
use wgpu::{BindingResource, Buffer, BufferDescriptor, BufferUsages, Device, Queue};

#[derive(Debug)]
pub struct ConstantBuffer {
    buffer: Buffer,
    staging: Vec<u8>,
    debug_name: String,
}

impl ConstantBuffer {
    pub fn new(device: &Device, layout: &ConstantBufferLayout<'_>, debug_name: &str) -> Self {
        let allocated_size = allocated_size(layout);
        logwise::info_sync!(
            "creating constant buffer {name} ({size} bytes)",
            name = logwise::privacy::LogIt(debug_name),
            size = allocated_size
        );
        let buffer = device.create_buffer(&BufferDescriptor {
            label: Some(debug_name),
            size: allocated_size,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ConstantBuffer {
            buffer,
            staging: vec![0; layout.total_size()],
            debug_name: debug_name.to_string(),
        }
    }

    /// Writes the current values to the GPU.
    ///
    /// # Panics
    /// Panics if `layout` is not the layout the buffer was created with.
    pub fn update<V: ValueSource + ?Sized>(
        &mut self,
        queue: &Queue,
        layout: &ConstantBufferLayout<'_>,
        values: &V,
    ) {
        check_layout(self.staging.len(), layout, &self.debug_name);
        if layout.is_empty() {
            return;
        }
        layout.fill(values, &mut self.staging);
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn binding_resource(&self) -> BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Bytes to allocate for `layout`.  Never zero, so the buffer can always be bound.
fn allocated_size(layout: &ConstantBufferLayout<'_>) -> u64 {
    layout.total_size().max(CONSTANT_BUFFER_ALIGNMENT) as u64
}

fn check_layout(staging_len: usize, layout: &ConstantBufferLayout<'_>, debug_name: &str) {
    assert_eq!(
        staging_len,
        layout.total_size(),
        "{debug_name} was created for a different layout"
    );
}
