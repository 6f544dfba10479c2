//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements        | Connects to                    |
//! |-------------|-------------------|--------------------------------|
//! | `json_file` | CalibrationStore  | JSON record on the filesystem  |
//! | `nvs`       | CalibrationStore  | Namespaced blob store (postcard)|
//! | `log_sink`  | EventSink         | `log` facade                   |

pub mod json_file;
pub mod log_sink;
pub mod nvs;
