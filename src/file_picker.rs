/// Native file dialog for picking a file to inspect.
use std::path::{Path, PathBuf};

/// Open the system file dialog. No filters: any file can carry metadata.
/// Returns `None` when the user cancels.
pub fn pick_file(start_dir: Option<&Path>) -> Option<PathBuf> {
    use rfd::FileDialog;

    let mut dialog = FileDialog::new();
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}
