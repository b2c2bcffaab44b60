use serde::{Deserialize, Serialize};

/// Top-level dashboard tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardTab {
    /// Single image grid with a prediction legend.
    ImageExplorer,
    /// Paginated table with the cohort toolbar.
    Table,
    /// Aggregate dataset characteristics.
    DataCharacteristics,
}

impl DashboardTab {
    /// Upper end of the slider-mapped thumbnail range for this tab.
    ///
    /// The detail-oriented explorer tolerates larger thumbnails than the
    /// dense grid views, hence the asymmetry.
    pub fn max_image_dim(self) -> u32 {
        match self {
            DashboardTab::ImageExplorer => 400,
            DashboardTab::Table | DashboardTab::DataCharacteristics => 100,
        }
    }

    /// Thumbnail size applied when switching to this tab (half the max).
    pub fn default_image_dim(self) -> u32 {
        self.max_image_dim() / 2
    }
}

/// Row count applied at mount for the table views.
pub const DEFAULT_NUM_ROWS: u32 = 3;
/// Page size applied at mount for the table views.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Active tab, pagination parameters, and the derived thumbnail size.
///
/// Switching tabs resets `image_dim` to the tab default; the slider then
/// adjusts it continuously within the tab's range.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewParameters {
    pub selected_tab: DashboardTab,
    pub image_dim: u32,
    pub num_rows: u32,
    pub page_size: u32,
    pub search_value: String,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            selected_tab: DashboardTab::ImageExplorer,
            image_dim: DashboardTab::ImageExplorer.default_image_dim(),
            num_rows: DEFAULT_NUM_ROWS,
            page_size: DEFAULT_PAGE_SIZE,
            search_value: String::new(),
        }
    }
}

impl ViewParameters {
    /// Activate a tab, resetting the thumbnail size to the tab default.
    pub fn switch_tab(&mut self, tab: DashboardTab) {
        self.selected_tab = tab;
        self.image_dim = tab.default_image_dim();
    }

    /// Map a 0-100 slider position linearly onto the active tab's pixel
    /// range, flooring to whole pixels. Returns the applied size.
    pub fn set_image_dim_from_slider(&mut self, slider_value: u32) -> u32 {
        let clamped = slider_value.min(100);
        self.image_dim = clamped * self.selected_tab.max_image_dim() / 100;
        self.image_dim
    }

    pub fn set_num_rows(&mut self, num_rows: u32) {
        self.num_rows = num_rows;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
    }

    /// The thumbnail slider is disabled on the characteristics tab.
    pub fn slider_enabled(&self) -> bool {
        self.selected_tab != DashboardTab::DataCharacteristics
    }

    /// Row-count/page-size selectors appear on every tab but the explorer.
    pub fn has_page_controls(&self) -> bool {
        self.selected_tab != DashboardTab::ImageExplorer
    }

    /// The explorer shows a fixed prediction legend instead of selectors.
    pub fn has_legend(&self) -> bool {
        self.selected_tab == DashboardTab::ImageExplorer
    }

    /// The cohort toolbar is only offered on the table view.
    pub fn cohort_toolbar_visible(&self) -> bool {
        self.selected_tab == DashboardTab::Table
    }
}
