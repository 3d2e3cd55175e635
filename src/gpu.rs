//! GPU-accelerated cell evaluation using a wgpu compute shader.
//!
//! The shader in `shaders/hilbert.wgsl` mirrors the CPU evaluator
//! statement for statement: same viewport transform, same integer Hilbert
//! transform, same window classification. Keep the two in lockstep when
//! changing either.

use bytemuck::{Pod, Zeroable};

use wgpu::util::DeviceExt;

use crate::viz::FrameUniforms;

/// Uniform parameters passed to the compute shader. Mirrors
/// `viz::FrameUniforms` in std140-compatible form.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Uniforms {
    /// Output texture width.
    view_width: u32,
    /// Output texture height.
    view_height: u32,
    /// File size in bytes.
    file_size: u32,
    /// Hilbert curve dimension (power of 2).
    dimension: u32,
    /// Viewport pan offset.
    offset_x: f32,
    offset_y: f32,
    /// Viewport zoom.
    zoom: f32,
    _pad: u32,
}

/// GPU renderer for the Hilbert classification visualization.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    /// Currently loaded file data buffer.
    file_buffer: Option<wgpu::Buffer>,
    /// Current file size.
    file_size: u32,
    /// Current Hilbert dimension.
    dimension: u32,
}

impl GpuRenderer {
    /// Maximum file size for GPU upload (within wgpu's default
    /// max_storage_buffer_binding_size). Larger files use the CPU path.
    pub const MAX_GPU_FILE_SIZE: usize = 120 * 1024 * 1024;

    /// Create a new GPU renderer, or `None` when no adapter is available.
    pub fn new() -> Option<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Panoptes GPU"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .ok()?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cell Evaluator Bind Group Layout"),
            entries: &[
                // Uniform buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // File data buffer (read-only)
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Output texture (write)
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cell Evaluator Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hilbert Cell Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/hilbert.wgsl").into()),
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Hilbert Cell Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader_module,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        Some(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            file_buffer: None,
            file_size: 0,
            dimension: 0,
        })
    }

    /// Upload file data to the GPU. Returns false if the file is too large
    /// for a storage binding, leaving rendering to the CPU path.
    pub fn upload_file(&mut self, data: &[u8], dimension: u64) -> bool {
        self.file_size = data.len() as u32;
        self.dimension = dimension as u32;

        if data.len() > Self::MAX_GPU_FILE_SIZE {
            println!(
                "File too large for GPU ({} MB > {} MB limit), using CPU fallback",
                data.len() / (1024 * 1024),
                Self::MAX_GPU_FILE_SIZE / (1024 * 1024)
            );
            self.file_buffer = None;
            return false;
        }

        self.file_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("File Data Buffer"),
                contents: data,
                usage: wgpu::BufferUsages::STORAGE,
            },
        ));

        true
    }

    /// Evaluate one frame and read back RGBA pixel data.
    pub fn render(&self, frame: &FrameUniforms) -> Vec<u8> {
        let view_width = frame.view_width as u32;
        let view_height = frame.view_height as u32;

        let Some(file_buffer) = &self.file_buffer else {
            return vec![0u8; (view_width * view_height * 4) as usize];
        };

        let uniforms = Uniforms {
            view_width,
            view_height,
            file_size: self.file_size,
            dimension: self.dimension,
            offset_x: frame.offset.x,
            offset_y: frame.offset.y,
            zoom: frame.zoom,
            _pad: 0,
        };

        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let output_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Output Texture"),
            size: wgpu::Extent3d {
                width: view_width,
                height: view_height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let output_view = output_texture.create_view(&Default::default());

        // bytes_per_row must be aligned to COPY_BYTES_PER_ROW_ALIGNMENT (256)
        let unpadded_bytes_per_row = view_width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = (unpadded_bytes_per_row + align - 1) / align * align;
        let output_buffer_size = (padded_bytes_per_row * view_height) as u64;
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: output_buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cell Evaluator Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: file_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cell Evaluator Encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Cell Evaluator Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            // Dispatch workgroups (8x8 threads per group)
            let workgroups_x = (view_width + 7) / 8;
            let workgroups_y = (view_height + 7) / 8;
            compute_pass.dispatch_workgroups(workgroups_x, workgroups_y, 1);
        }

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(view_height),
                },
            },
            wgpu::Extent3d {
                width: view_width,
                height: view_height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Read back the result
        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv().unwrap().unwrap();

        let data = buffer_slice.get_mapped_range();

        // Remove row padding if present
        let result = if padded_bytes_per_row != unpadded_bytes_per_row {
            let mut unpacked = Vec::with_capacity((view_width * view_height * 4) as usize);
            for row in 0..view_height {
                let start = (row * padded_bytes_per_row) as usize;
                let end = start + unpadded_bytes_per_row as usize;
                unpacked.extend_from_slice(&data[start..end]);
            }
            unpacked
        } else {
            data.to_vec()
        };

        drop(data);
        output_buffer.unmap();

        result
    }

    /// Check if the renderer has a file uploaded and ready.
    pub fn is_ready(&self) -> bool {
        self.file_buffer.is_some()
    }
}
