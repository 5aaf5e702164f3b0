//! msdfgen process handling against a slow stand-in executable

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use bmsdf_render::*;
use bmsdf_shape::{OutlineCommand, ShapeBuilder};

/// Script that ignores its arguments and sleeps for five seconds
fn slow_renderer_script() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bmsdf-slow-renderer-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("msdfgen");
    std::fs::write(&path, "#!/bin/sh\nexec sleep 5\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn invocation() -> RenderInvocation {
    RenderInvocation {
        field_type: FieldType::Sdf,
        width: 4,
        height: 4,
        translate_x: 1.0,
        translate_y: 1.0,
        distance_range: 1,
        shape: "{0, 0; 1, 0; 1, 1}".into(),
    }
}

fn request(character: char, size: f32) -> GlyphRenderRequest {
    let commands = vec![
        OutlineCommand::MoveTo(0.0, 0.0),
        OutlineCommand::LineTo(size, 0.0),
        OutlineCommand::LineTo(size, size),
        OutlineCommand::Close,
    ];
    GlyphRenderRequest {
        character,
        glyph_index: character as u16,
        shape: ShapeBuilder::new(1.0).build(&commands),
        advance: size,
    }
}

/// Fails 6 pixel wide glyphs at once, hands everything else to the slow process
struct FailSmallest {
    slow: MsdfgenProcess,
}

impl SdfRenderer for FailSmallest {
    async fn render(&self, inv: &RenderInvocation) -> Result<String> {
        if inv.width == 6 {
            return Err(RenderError::Process {
                command: inv.to_string(),
                status: "exit status: 1".into(),
                stderr: "bad shape".into(),
            });
        }
        self.slow.render(inv).await
    }
}

#[test]
fn test_slow_renderer_is_cut_off() {
    let script = slow_renderer_script();

    // Timeout race
    let renderer = MsdfgenProcess::new(&script).with_timeout(Some(Duration::from_millis(100)));
    let start = Instant::now();
    let result = smol::block_on(renderer.render(&invocation()));
    match result {
        Err(RenderError::Timeout { after, .. }) => assert_eq!(after, Duration::from_millis(100)),
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(start.elapsed() < Duration::from_secs(2));

    // A failing glyph ends the batch without waiting on the slow ones
    let renderer = FailSmallest { slow: MsdfgenProcess::new(&script) };
    let requests = vec![request('a', 10.0), request('b', 10.0), request('c', 2.0), request('d', 10.0)];
    let settings = RenderSettings {
        field_type: FieldType::Sdf,
        distance_range: 2,
        scale: 1.0,
        baseline: 0.0,
        concurrency: 4,
        round_decimal: None,
    };
    let start = Instant::now();
    let result = smol::block_on(render_glyphs(&renderer, &requests, &settings));
    assert!(matches!(result, Err(RenderError::Process { .. })), "{result:?}");
    assert!(start.elapsed() < Duration::from_secs(2));

    std::fs::remove_dir_all(script.parent().unwrap()).unwrap();
}
