use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mazing::camera::Camera;
use mazing::clipper::{ScreenTriangle, ScreenVertex};
use mazing::color::Color;
use mazing::level::{generate_partial_meshes, BlockGrid};
use mazing::math::vec3::Vec3;
use mazing::render::{
    DepthMode, DepthScanlineRasterizer, FrameBuffer, Rasterizer, RenderOptions, Renderer,
    ScanlineRasterizer,
};
use mazing::world::World;

const BUFFER_WIDTH: usize = 800;
const BUFFER_HEIGHT: usize = 600;

fn triangle(points: [(f64, f64); 3], z: f64) -> ScreenTriangle {
    ScreenTriangle {
        vertices: points.map(|(x, y)| ScreenVertex::new(x, y, z)),
        color: Color::RED,
        depth: z,
    }
}

fn small_triangle() -> ScreenTriangle {
    triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)], 0.5)
}

fn medium_triangle() -> ScreenTriangle {
    triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)], 0.5)
}

fn large_triangle() -> ScreenTriangle {
    triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)], 0.5)
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let depth_scanline = DepthScanlineRasterizer::new();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| scanline.fill_triangle(black_box(tri), &mut fb));
        });

        group.bench_with_input(BenchmarkId::new("depth_scanline", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                depth_scanline.fill_triangle(black_box(tri), &mut fb);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();
    let depth_scanline = DepthScanlineRasterizer::new();

    // A grid of small triangles
    let triangles: Vec<ScreenTriangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = f64::from(col) * 40.0;
                let y = f64::from(row) * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)], 0.5)
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb);
            }
        });
    });

    group.bench_function("depth_scanline_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear_depth();
            for tri in &triangles {
                depth_scanline.fill_triangle(black_box(tri), &mut fb);
            }
        });
    });

    group.finish();
}

fn benchmark_level_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_frame");

    let mut blocks = BlockGrid::new(16, 16);
    for i in 0..16 {
        blocks.set(i, 0, Some(Color::BLUE));
        blocks.set(i, 15, Some(Color::BLUE));
        blocks.set(0, i, Some(Color::GREEN));
        blocks.set(15, i, Some(Color::GREEN));
        blocks.set(i, i, Some(Color::RED));
    }
    let world = World::new(generate_partial_meshes(&blocks));

    let mut camera = Camera::new(90.0, BUFFER_WIDTH as f64 / BUFFER_HEIGHT as f64, 0.1, 100.0)
        .expect("valid projection");
    camera.set_position(Vec3::new(8.0, 3.0, 4.0));

    for mode in [DepthMode::PainterSort, DepthMode::ZBuffer] {
        group.bench_function(BenchmarkId::new("solid", mode), |b| {
            let mut renderer = Renderer::new(RenderOptions {
                depth_mode: mode,
                ..RenderOptions::default()
            });
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear(Color::BLACK);
                renderer.render_solid(black_box(&world), &camera, &mut fb);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_level_frame
);
criterion_main!(benches);
