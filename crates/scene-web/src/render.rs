use glam::Vec3;
use scene_core::{
    boat_model_matrix, water_model_matrix, BoatMesh, SceneState, BOAT_SHININESS, BOAT_SPECULAR,
    LIGHT_COLOR, LIGHT_COUNT, LIGHT_MARKER_SIZE, MAX_RIPPLES, WATER_SIZE,
};
use web_sys as web;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// ===================== Uniform / vertex packing =====================

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct WaterUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    time: f32,
    _pad: [f32; 3],
    // start time in .x, rest is padding to the 16-byte uniform stride
    ripple_start_times: [[f32; 4]; MAX_RIPPLES],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BoatUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    material: [f32; 4],
    lights: [LightPacked; LIGHT_COUNT],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerUniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4], // size in .w
    camera_up: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerInstance {
    pos: [f32; 3],
    _pad: f32,
    color: [f32; 4],
}

struct BoatBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    water_pipeline: wgpu::RenderPipeline,
    water_vb: wgpu::Buffer,
    water_uniform_buffer: wgpu::Buffer,
    water_bind_group: wgpu::BindGroup,

    boat_pipeline: wgpu::RenderPipeline,
    boat_uniform_buffer: wgpu::Buffer,
    boat_bind_group: wgpu::BindGroup,
    boat: Option<BoatBuffers>,

    marker_pipeline: wgpu::RenderPipeline,
    marker_quad_vb: wgpu::Buffer,
    marker_instance_vb: wgpu::Buffer,
    marker_uniform_buffer: wgpu::Buffer,
    marker_bind_group: wgpu::BindGroup,

    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // ---------------- Water plane ----------------
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::WATER_WGSL.into()),
        });
        let half = WATER_SIZE / 2.0;
        // local XY plane; the model matrix lays it flat
        #[rustfmt::skip]
        let water_vertices: [f32; 30] = [
            -half, -half, 0.0, 0.0, 0.0,
             half, -half, 0.0, 1.0, 0.0,
             half,  half, 0.0, 1.0, 1.0,
            -half, -half, 0.0, 0.0, 0.0,
             half,  half, 0.0, 1.0, 1.0,
            -half,  half, 0.0, 0.0, 1.0,
        ];
        let water_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_vb"),
            contents: bytemuck::cast_slice(&water_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let water_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("water_uniforms"),
            size: std::mem::size_of::<WaterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let water_bgl = uniform_bind_group_layout(&device, "water_bgl");
        let water_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("water_bg"),
            layout: &water_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: water_uniform_buffer.as_entire_binding(),
            }],
        });
        let water_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("water_pl"),
            bind_group_layouts: &[&water_bgl],
            push_constant_ranges: &[],
        });
        let water_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("water_pipeline"),
            layout: Some(&water_pl),
            vertex: wgpu::VertexState {
                module: &water_shader,
                entry_point: Some("vs_water"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 5) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(depth_state(false, wgpu::CompareFunction::Always)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &water_shader,
                entry_point: Some("fs_water"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // ---------------- Boat ----------------
        let boat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("boat_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::BOAT_WGSL.into()),
        });
        let boat_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("boat_uniforms"),
            size: std::mem::size_of::<BoatUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let boat_bgl = uniform_bind_group_layout(&device, "boat_bgl");
        let boat_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("boat_bg"),
            layout: &boat_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: boat_uniform_buffer.as_entire_binding(),
            }],
        });
        let boat_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("boat_pl"),
            bind_group_layouts: &[&boat_bgl],
            push_constant_ranges: &[],
        });
        let boat_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("boat_pipeline"),
            layout: Some(&boat_pl),
            vertex: wgpu::VertexState {
                module: &boat_shader,
                entry_point: Some("vs_boat"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 6) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(depth_state(true, wgpu::CompareFunction::Less)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &boat_shader,
                entry_point: Some("fs_boat"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // ---------------- Light markers ----------------
        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("marker_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::MARKER_WGSL.into()),
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let marker_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let marker_instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_instance_vb"),
            size: (std::mem::size_of::<MarkerInstance>() * LIGHT_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let marker_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_uniforms"),
            size: std::mem::size_of::<MarkerUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let marker_bgl = uniform_bind_group_layout(&device, "marker_bgl");
        let marker_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("marker_bg"),
            layout: &marker_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: marker_uniform_buffer.as_entire_binding(),
            }],
        });
        let marker_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("marker_pl"),
            bind_group_layouts: &[&marker_bgl],
            push_constant_ranges: &[],
        });
        let marker_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("marker_pipeline"),
            layout: Some(&marker_pl),
            vertex: wgpu::VertexState {
                module: &marker_shader,
                entry_point: Some("vs_marker"),
                buffers: &[
                    // slot 0: quad corners
                    wgpu::VertexBufferLayout {
                        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    // slot 1: per-light instance data
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x3,
                                offset: 0,
                                shader_location: 1,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x4,
                                offset: 16,
                                shader_location: 2,
                            },
                        ],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(depth_state(false, wgpu::CompareFunction::Less)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &marker_shader,
                entry_point: Some("fs_marker"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            water_pipeline,
            water_vb,
            water_uniform_buffer,
            water_bind_group,
            boat_pipeline,
            boat_uniform_buffer,
            boat_bind_group,
            boat: None,
            marker_pipeline,
            marker_quad_vb,
            marker_instance_vb,
            marker_uniform_buffer,
            marker_bind_group,
            depth_view,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Upload the decoded boat geometry. Until this runs, frames render
    /// without the boat.
    pub fn upload_boat(&mut self, mesh: &BoatMesh) {
        let mut vertices: Vec<f32> = Vec::with_capacity(mesh.positions.len() * 6);
        for (pos, normal) in mesh.positions.iter().zip(&mesh.normals) {
            vertices.extend_from_slice(pos);
            vertices.extend_from_slice(normal);
        }
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("boat_vb"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("boat_ib"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.boat = Some(BoatBuffers {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        });
    }

    pub fn render(
        &mut self,
        scene: &SceneState,
        time_sec: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let view_proj = scene.camera.view_proj(aspect);
        let view_mat = scene.camera.view_matrix();

        // Water: time plus ripple start times
        let mut ripple_start_times = [[0.0f32; 4]; MAX_RIPPLES];
        for (slot, start) in ripple_start_times
            .iter_mut()
            .zip(scene.ripples.start_times())
        {
            slot[0] = *start;
        }
        self.queue.write_buffer(
            &self.water_uniform_buffer,
            0,
            bytemuck::bytes_of(&WaterUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: water_model_matrix().to_cols_array_2d(),
                time: time_sec,
                _pad: [0.0; 3],
                ripple_start_times,
            }),
        );

        // Boat: camera, material and the current light positions
        let mut lights = [LightPacked {
            position: [0.0; 4],
            color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], 1.0],
        }; LIGHT_COUNT];
        for (packed, pos) in lights.iter_mut().zip(scene.lights.positions()) {
            packed.position = [pos.x, pos.y, pos.z, 1.0];
        }
        let eye = scene.camera.eye();
        self.queue.write_buffer(
            &self.boat_uniform_buffer,
            0,
            bytemuck::bytes_of(&BoatUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: boat_model_matrix().to_cols_array_2d(),
                camera_pos: [eye.x, eye.y, eye.z, 1.0],
                material: [BOAT_SHININESS, BOAT_SPECULAR, 0.0, 0.0],
                lights,
            }),
        );

        // Markers: billboard basis from the view matrix rows
        let camera_right = Vec3::new(view_mat.x_axis.x, view_mat.y_axis.x, view_mat.z_axis.x);
        let camera_up = Vec3::new(view_mat.x_axis.y, view_mat.y_axis.y, view_mat.z_axis.y);
        self.queue.write_buffer(
            &self.marker_uniform_buffer,
            0,
            bytemuck::bytes_of(&MarkerUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                camera_right: [camera_right.x, camera_right.y, camera_right.z, LIGHT_MARKER_SIZE],
                camera_up: [camera_up.x, camera_up.y, camera_up.z, 0.0],
            }),
        );
        let mut instances = [MarkerInstance {
            pos: [0.0; 3],
            _pad: 0.0,
            color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], 1.0],
        }; LIGHT_COUNT];
        for (inst, pos) in instances.iter_mut().zip(scene.lights.positions()) {
            inst.pos = pos.to_array();
        }
        self.queue
            .write_buffer(&self.marker_instance_vb, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Water first, boat after it, markers on top
            rpass.set_pipeline(&self.water_pipeline);
            rpass.set_bind_group(0, &self.water_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.water_vb.slice(..));
            rpass.draw(0..6, 0..1);

            if let Some(boat) = &self.boat {
                rpass.set_pipeline(&self.boat_pipeline);
                rpass.set_bind_group(0, &self.boat_bind_group, &[]);
                rpass.set_vertex_buffer(0, boat.vertex_buffer.slice(..));
                rpass.set_index_buffer(boat.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..boat.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.marker_pipeline);
            rpass.set_bind_group(0, &self.marker_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.marker_quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.marker_instance_vb.slice(..));
            rpass.draw(0..6, 0..(LIGHT_COUNT as u32));
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
