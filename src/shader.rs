//! WGSL source for the instanced shape pipeline.
//!
//! Every draw the canvas records becomes one instance of a unit quad:
//! circles are cut out of the quad with a distance discard in the
//! fragment stage, rects pass through. Pixel coordinates are mapped to
//! clip space with the y axis flipped so the origin sits at the top
//! left, matching the canvas facade.

pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) @interpolate(flat) kind: u32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) half_size: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) kind: u32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let pos = center + corner * half_size;
    let ndc = vec2<f32>(
        pos.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - pos.y / uniforms.resolution.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    out.uv = corner;
    out.kind = kind;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if in.kind == 0u {
        let dist = length(in.uv);
        if dist > 1.0 {
            discard;
        }
        let edge = 1.0 - smoothstep(0.85, 1.0, dist);
        return vec4<f32>(in.color.rgb, in.color.a * edge);
    }
    return in.color;
}
"#;
