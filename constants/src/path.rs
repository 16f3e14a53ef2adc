/// Model asset loaded by the viewer, relative to the asset root
pub const MODEL_ASSET_PATH: &str = "models/model.glb";

/// Canvas selector the viewer mounts into on web builds
pub const VIEWER_CANVAS_SELECTOR: &str = "#viewer";
