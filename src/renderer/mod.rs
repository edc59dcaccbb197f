use crate::core::AnimatedPanel;
use crate::math::{Mat4, Vec3};
use crate::scene::{Camera, Mesh, Vertex};
use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2_core_foundation::CGSize;
use objc2_foundation::NSString;
use objc2_metal::{
    MTLBuffer, MTLClearColor, MTLCommandBuffer, MTLCommandEncoder, MTLCommandQueue,
    MTLCompileOptions, MTLCreateSystemDefaultDevice, MTLDepthStencilDescriptor,
    MTLDepthStencilState, MTLDevice, MTLDrawable, MTLIndexType, MTLLibrary, MTLLoadAction,
    MTLPixelFormat, MTLPrimitiveType, MTLRenderCommandEncoder, MTLRenderPassDescriptor,
    MTLRenderPipelineDescriptor, MTLRenderPipelineState, MTLResourceOptions, MTLStoreAction,
    MTLTexture, MTLTextureDescriptor, MTLTextureUsage, MTLVertexDescriptor,
};
use objc2_quartz_core::{CAMetalDrawable, CAMetalLayer};
use winit::raw_window_handle::RawWindowHandle;

const FILL_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const OUTLINE_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.0);

#[repr(C)]
struct Uniforms {
    mvp_matrix: Mat4,
    color: Vec3,
}

struct PanelBuffers {
    vertex_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    fill_index_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    outline_index_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    fill_uniform_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    outline_uniform_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    fill_index_count: usize,
    outline_index_count: usize,
}

/// Thin Metal wrapper that draws the panels: white fill plus black
/// outline per panel, on a white clear color.
pub struct PanelRenderer {
    device: Retained<ProtocolObject<dyn MTLDevice>>,
    command_queue: Retained<ProtocolObject<dyn MTLCommandQueue>>,
    layer: Retained<CAMetalLayer>,
    pipeline_state: Retained<ProtocolObject<dyn MTLRenderPipelineState>>,
    depth_stencil_state: Retained<ProtocolObject<dyn MTLDepthStencilState>>,
    depth_texture: Option<Retained<ProtocolObject<dyn MTLTexture>>>,
    panel_buffers: Vec<PanelBuffers>,
    drawable_size: (u32, u32),
    camera: Camera,
}

impl PanelRenderer {
    pub fn new(window_handle: RawWindowHandle, width: u32, height: u32) -> Result<Self, String> {
        let device = MTLCreateSystemDefaultDevice()
            .ok_or_else(|| "Rendering unavailable: no default Metal device".to_string())?;

        let command_queue = device
            .newCommandQueue()
            .ok_or_else(|| "Failed to create command queue".to_string())?;

        let layer = Self::create_metal_layer(&device, window_handle)?;

        let pipeline_state = Self::create_pipeline_state(&device)?;
        let depth_stencil_state = Self::create_depth_stencil_state(&device)?;
        let depth_texture = Self::create_depth_texture(&device, width, height)?;

        let aspect_ratio = width as f32 / height as f32;
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 15.0),
            Vec3::new(0.0, 0.0, 0.0),
            aspect_ratio,
        );

        Ok(Self {
            device,
            command_queue,
            layer,
            pipeline_state,
            depth_stencil_state,
            depth_texture: Some(depth_texture),
            panel_buffers: Vec::new(),
            drawable_size: (width, height),
            camera,
        })
    }

    fn create_metal_layer(
        device: &ProtocolObject<dyn MTLDevice>,
        window_handle: RawWindowHandle,
    ) -> Result<Retained<CAMetalLayer>, String> {
        let layer = unsafe { CAMetalLayer::new() };

        unsafe {
            layer.setDevice(Some(device));
            layer.setPixelFormat(MTLPixelFormat::BGRA8Unorm);
            layer.setOpaque(true);
        }

        match window_handle {
            RawWindowHandle::AppKit(handle) => unsafe {
                use objc2::runtime::AnyObject;

                let view = handle.ns_view.as_ptr().cast::<AnyObject>();
                let _: () = msg_send![view, setWantsLayer: true];
                let _: () = msg_send![view, setLayer: &*layer];
            },
            _ => return Err("Unsupported window handle type".to_string()),
        }

        Ok(layer)
    }

    fn create_vertex_buffer(
        device: &ProtocolObject<dyn MTLDevice>,
        vertices: &[Vertex],
    ) -> Result<Retained<ProtocolObject<dyn MTLBuffer>>, String> {
        let vertex_data = vertices.as_ptr().cast::<std::ffi::c_void>();
        let vertex_data_size = std::mem::size_of_val(vertices);

        let buffer = unsafe {
            device.newBufferWithBytes_length_options(
                std::ptr::NonNull::new(vertex_data.cast_mut())
                    .ok_or_else(|| "Vertex data pointer is null".to_string())?,
                vertex_data_size,
                MTLResourceOptions::CPUCacheModeDefaultCache,
            )
        }
        .ok_or_else(|| "Failed to create vertex buffer".to_string())?;

        Ok(buffer)
    }

    fn create_index_buffer(
        device: &ProtocolObject<dyn MTLDevice>,
        indices: &[u16],
    ) -> Result<Retained<ProtocolObject<dyn MTLBuffer>>, String> {
        let index_data = indices.as_ptr().cast::<std::ffi::c_void>();
        let index_data_size = std::mem::size_of_val(indices);

        let buffer = unsafe {
            device.newBufferWithBytes_length_options(
                std::ptr::NonNull::new(index_data.cast_mut())
                    .ok_or_else(|| "Index data pointer is null".to_string())?,
                index_data_size,
                MTLResourceOptions::CPUCacheModeDefaultCache,
            )
        }
        .ok_or_else(|| "Failed to create index buffer".to_string())?;

        Ok(buffer)
    }

    fn create_uniform_buffer(
        device: &ProtocolObject<dyn MTLDevice>,
    ) -> Result<Retained<ProtocolObject<dyn MTLBuffer>>, String> {
        let buffer_size = std::mem::size_of::<Uniforms>();

        let buffer = device
            .newBufferWithLength_options(buffer_size, MTLResourceOptions::CPUCacheModeDefaultCache)
            .ok_or_else(|| "Failed to create uniform buffer".to_string())?;

        Ok(buffer)
    }

    fn create_pipeline_state(
        device: &ProtocolObject<dyn MTLDevice>,
    ) -> Result<Retained<ProtocolObject<dyn MTLRenderPipelineState>>, String> {
        let shader_source = include_str!("../shaders/panel.metal");
        let source_string = NSString::from_str(shader_source);
        let compile_options = MTLCompileOptions::new();

        let library = device
            .newLibraryWithSource_options_error(&source_string, Some(&compile_options))
            .map_err(|e| format!("Failed to compile shaders: {e:?}"))?;

        let vertex_fn_name = NSString::from_str("panel_vertex");
        let vertex_function = library
            .newFunctionWithName(&vertex_fn_name)
            .ok_or_else(|| "Failed to find vertex function".to_string())?;

        let fragment_fn_name = NSString::from_str("panel_fragment");
        let fragment_function = library
            .newFunctionWithName(&fragment_fn_name)
            .ok_or_else(|| "Failed to find fragment function".to_string())?;

        let vertex_descriptor = unsafe { MTLVertexDescriptor::new() };
        unsafe {
            let position_attr = vertex_descriptor.attributes().objectAtIndexedSubscript(0);
            position_attr.setFormat(objc2_metal::MTLVertexFormat::Float3);
            position_attr.setOffset(0);
            position_attr.setBufferIndex(0);

            let layout = vertex_descriptor.layouts().objectAtIndexedSubscript(0);
            layout.setStride(std::mem::size_of::<Vertex>());
        }

        let pipeline_descriptor = MTLRenderPipelineDescriptor::new();
        unsafe {
            pipeline_descriptor.setVertexFunction(Some(&vertex_function));
            pipeline_descriptor.setFragmentFunction(Some(&fragment_function));
            pipeline_descriptor.setVertexDescriptor(Some(&vertex_descriptor));
            pipeline_descriptor.setDepthAttachmentPixelFormat(MTLPixelFormat::Depth32Float);

            let color_attachment = pipeline_descriptor
                .colorAttachments()
                .objectAtIndexedSubscript(0);
            color_attachment.setPixelFormat(MTLPixelFormat::BGRA8Unorm);
        }

        let pipeline_state = device
            .newRenderPipelineStateWithDescriptor_error(&pipeline_descriptor)
            .map_err(|e| format!("Failed to create pipeline state: {e:?}"))?;

        Ok(pipeline_state)
    }

    fn create_depth_stencil_state(
        device: &ProtocolObject<dyn MTLDevice>,
    ) -> Result<Retained<ProtocolObject<dyn MTLDepthStencilState>>, String> {
        let descriptor = unsafe { MTLDepthStencilDescriptor::new() };
        descriptor.setDepthCompareFunction(objc2_metal::MTLCompareFunction::LessEqual);
        descriptor.setDepthWriteEnabled(true);

        let state = device
            .newDepthStencilStateWithDescriptor(&descriptor)
            .ok_or_else(|| "Failed to create depth stencil state".to_string())?;

        Ok(state)
    }

    fn create_depth_texture(
        device: &ProtocolObject<dyn MTLDevice>,
        width: u32,
        height: u32,
    ) -> Result<Retained<ProtocolObject<dyn MTLTexture>>, String> {
        let descriptor = unsafe { MTLTextureDescriptor::new() };
        unsafe {
            descriptor.setPixelFormat(MTLPixelFormat::Depth32Float);
            descriptor.setWidth(width as usize);
            descriptor.setHeight(height as usize);
            descriptor.setUsage(MTLTextureUsage::RenderTarget);
        }

        let texture = device
            .newTextureWithDescriptor(&descriptor)
            .ok_or_else(|| "Failed to create depth texture".to_string())?;

        Ok(texture)
    }

    /// Create the GPU buffers for every panel. Called once after the
    /// panels are constructed; the fill and outline meshes share a
    /// vertex buffer since they index the same eight corners.
    pub fn initialize_panels(&mut self, panels: &[AnimatedPanel]) -> Result<(), String> {
        self.panel_buffers.clear();

        for panel in panels {
            let dims = panel.descriptor.dimensions;
            let fill = Mesh::panel(dims.x, dims.y, dims.z);
            let outline = Mesh::panel_outline(dims.x, dims.y, dims.z);

            let buffers = PanelBuffers {
                vertex_buffer: Self::create_vertex_buffer(&self.device, &fill.vertices)?,
                fill_index_count: fill.indices.len(),
                fill_index_buffer: Self::create_index_buffer(&self.device, &fill.indices)?,
                outline_index_count: outline.indices.len(),
                outline_index_buffer: Self::create_index_buffer(&self.device, &outline.indices)?,
                fill_uniform_buffer: Self::create_uniform_buffer(&self.device)?,
                outline_uniform_buffer: Self::create_uniform_buffer(&self.device)?,
            };
            self.panel_buffers.push(buffers);
        }

        Ok(())
    }

    fn write_uniforms(
        buffer: &ProtocolObject<dyn MTLBuffer>,
        mvp_matrix: Mat4,
        color: Vec3,
    ) {
        let uniforms = Uniforms { mvp_matrix, color };
        // Safety: the buffer was created with sizeof(Uniforms) bytes and
        // its contents pointer stays valid for the buffer's lifetime.
        unsafe {
            let contents = buffer.contents();
            std::ptr::copy_nonoverlapping(
                &raw const uniforms,
                contents.as_ptr().cast::<Uniforms>(),
                1,
            );
        }
    }

    pub fn render(&mut self, panels: &[AnimatedPanel]) -> Result<(), String> {
        let drawable = unsafe { self.layer.nextDrawable() }
            .ok_or_else(|| "Failed to get next drawable".to_string())?;

        let command_buffer = self
            .command_queue
            .commandBuffer()
            .ok_or_else(|| "Failed to create command buffer".to_string())?;

        let label = NSString::from_str("Panel Render Pass");
        command_buffer.setLabel(Some(&label));

        let view_projection = self.camera.view_projection_matrix();

        let render_pass_descriptor = unsafe { MTLRenderPassDescriptor::new() };
        let color_attachment = unsafe {
            render_pass_descriptor
                .colorAttachments()
                .objectAtIndexedSubscript(0)
        };

        unsafe {
            color_attachment.setTexture(Some(&drawable.texture()));
            color_attachment.setLoadAction(MTLLoadAction::Clear);
            color_attachment.setClearColor(MTLClearColor {
                red: 1.0,
                green: 1.0,
                blue: 1.0,
                alpha: 1.0,
            });
            color_attachment.setStoreAction(MTLStoreAction::Store);
        }

        if let Some(depth_texture) = &self.depth_texture {
            let depth_attachment = render_pass_descriptor.depthAttachment();
            depth_attachment.setTexture(Some(depth_texture));
            depth_attachment.setLoadAction(MTLLoadAction::Clear);
            depth_attachment.setClearDepth(1.0);
            depth_attachment.setStoreAction(MTLStoreAction::DontCare);
        }

        if let Some(render_encoder) =
            command_buffer.renderCommandEncoderWithDescriptor(&render_pass_descriptor)
        {
            let label = NSString::from_str("Panel Encoder");
            render_encoder.setLabel(Some(&label));

            render_encoder.setRenderPipelineState(&self.pipeline_state);
            render_encoder.setDepthStencilState(Some(&self.depth_stencil_state));

            for (panel, buffers) in panels.iter().zip(&self.panel_buffers) {
                let model = Mat4::translation(panel.position);
                let mvp_matrix = view_projection.multiply(&model);

                Self::write_uniforms(&buffers.fill_uniform_buffer, mvp_matrix, FILL_COLOR);
                Self::write_uniforms(&buffers.outline_uniform_buffer, mvp_matrix, OUTLINE_COLOR);

                unsafe {
                    render_encoder.setVertexBuffer_offset_atIndex(
                        Some(&buffers.vertex_buffer),
                        0,
                        0,
                    );

                    render_encoder.setVertexBuffer_offset_atIndex(
                        Some(&buffers.fill_uniform_buffer),
                        0,
                        1,
                    );
                    render_encoder
                        .drawIndexedPrimitives_indexCount_indexType_indexBuffer_indexBufferOffset(
                            MTLPrimitiveType::Triangle,
                            buffers.fill_index_count,
                            MTLIndexType::UInt16,
                            &buffers.fill_index_buffer,
                            0,
                        );

                    render_encoder.setVertexBuffer_offset_atIndex(
                        Some(&buffers.outline_uniform_buffer),
                        0,
                        1,
                    );
                    render_encoder
                        .drawIndexedPrimitives_indexCount_indexType_indexBuffer_indexBufferOffset(
                            MTLPrimitiveType::Line,
                            buffers.outline_index_count,
                            MTLIndexType::UInt16,
                            &buffers.outline_index_buffer,
                            0,
                        );
                }
            }

            render_encoder.endEncoding();
        }

        // Safety: CAMetalDrawable conforms to the MTLDrawable protocol.
        unsafe {
            let mtl_drawable = (&raw const *drawable).cast::<ProtocolObject<dyn MTLDrawable>>();
            command_buffer.presentDrawable(&*mtl_drawable);
        }

        command_buffer.commit();

        Ok(())
    }

    pub fn update_drawable_size(&mut self, width: u32, height: u32) {
        self.drawable_size = (width, height);

        let size = CGSize {
            width: f64::from(width),
            height: f64::from(height),
        };
        unsafe {
            self.layer.setDrawableSize(size);
        }

        self.camera.set_aspect_ratio(width as f32 / height as f32);

        // Recreate depth texture with new size
        if let Ok(depth_texture) = Self::create_depth_texture(&self.device, width, height) {
            self.depth_texture = Some(depth_texture);
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
