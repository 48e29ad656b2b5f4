#![forbid(unsafe_code)]


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use quadlab_core::config::{DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};
    use quadlab_core::{parse_args, AssetsRoot, CliCommand, DemoConfig};
    use quadlab_runtime_glow::renderer::{
        ATTR_VERTEX_POS, UNIFORM_SCREEN_HEIGHT, UNIFORM_SCREEN_WIDTH, UNIFORM_TIME,
    };
    use quadlab_runtime_glow::{ProgramSources, ShaderStage};

    // ---- Golden fixtures (shipped shaders) ----
    const BASIC_VERTEX: &str = include_str!("../../../shaders/basic_vertex.vshader");
    const BASIC_FRAGMENT: &str = include_str!("../../../shaders/basic_fragment.fshader");
    const RINGS_FRAGMENT: &str = include_str!("../../../shaders/rings_fragment.fshader");

    const ALT_FRAGMENT: &str = "#version 330 core\nout vec4 c;\nvoid main(){ c = vec4(1.0); }\n";

    fn temp_assets(name: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let root = std::env::temp_dir().join(format!("quadlab_contract_{name}_{ts}"));
        fs::create_dir_all(root.join("shaders")).expect("create temp assets");
        fs::write(root.join(DEFAULT_VERTEX_SHADER), BASIC_VERTEX).expect("write vertex");
        fs::write(root.join(DEFAULT_FRAGMENT_SHADER), BASIC_FRAGMENT).expect("write fragment");
        root
    }

    fn sources_for(cfg: &DemoConfig) -> ProgramSources {
        ProgramSources::from_paths(
            &cfg.vertex_shader,
            cfg.geometry_shader.as_deref(),
            &cfg.fragment_shader,
        )
        .expect("sources should load")
    }

    fn config_from(root: &Path, args: &[&str]) -> DemoConfig {
        let assets = AssetsRoot::discover(root).expect("assets");
        match parse_args(args.iter().copied()).expect("args") {
            CliCommand::Run { fragment } => {
                DemoConfig::with_assets(&assets).with_fragment_override(fragment)
            }
            CliCommand::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn default_run_loads_default_shaders() {
        let root = temp_assets("defaults");

        let sources = sources_for(&config_from(&root, &[]));
        assert_eq!(sources.vertex.text, BASIC_VERTEX);
        assert_eq!(sources.fragment.text, BASIC_FRAGMENT);
        assert!(sources.geometry.is_none());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn cli_fragment_replaces_default_fragment_stage() {
        let root = temp_assets("override");
        let alt = root.join("alt.fshader");
        fs::write(&alt, ALT_FRAGMENT).unwrap();
        let alt_arg = alt.to_string_lossy().into_owned();

        let sources = sources_for(&config_from(&root, &[alt_arg.as_str()]));
        assert_eq!(sources.fragment.stage, ShaderStage::Fragment);
        assert_eq!(sources.fragment.text, ALT_FRAGMENT);
        assert_eq!(sources.fragment.origin, alt.display().to_string());
        // Vertex stage is unaffected.
        assert_eq!(sources.vertex.text, BASIC_VERTEX);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_cli_fragment_is_an_io_error() {
        let root = temp_assets("missing");
        let cfg = config_from(&root, &["does/not/exist.fshader"]);

        let err = ProgramSources::from_paths(&cfg.vertex_shader, None, &cfg.fragment_shader)
            .expect_err("missing fragment must fail");
        assert!(err.to_string().contains("exist.fshader"), "got: {err}");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn shipped_shaders_declare_looked_up_names() {
        assert!(BASIC_VERTEX.contains(ATTR_VERTEX_POS));
        for frag in [BASIC_FRAGMENT, RINGS_FRAGMENT] {
            for name in [UNIFORM_TIME, UNIFORM_SCREEN_WIDTH, UNIFORM_SCREEN_HEIGHT] {
                assert!(
                    frag.contains(&format!("uniform float {name};")),
                    "missing uniform {name}"
                );
            }
            assert!(frag.starts_with("#version 330 core"));
        }
    }
}
