use crate::error::{ChartError, Result};

/// Grid dimensions of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubplotLayout {
    pub rows: usize,
    pub columns: usize,
}

impl SubplotLayout {
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

/// Compute the subplot grid for `n_charts` charts.
///
/// Without subplots every chart shares a single plot area. With subplots the
/// charts fill rows of at most `max_cols` plot areas.
pub fn get_subplot_layout(as_subplots: bool, n_charts: usize, max_cols: usize) -> Result<SubplotLayout> {
    if n_charts == 0 || max_cols == 0 {
        return Err(ChartError::InvalidLayout { n_charts, max_cols });
    }

    if !as_subplots {
        return Ok(SubplotLayout { rows: 1, columns: 1 });
    }

    let rows = n_charts.div_ceil(max_cols);
    let columns = if n_charts >= max_cols {
        max_cols
    } else {
        n_charts % max_cols
    };
    Ok(SubplotLayout { rows, columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_area_is_single_cell() {
        for n in 1..6 {
            for m in 1..6 {
                let layout = get_subplot_layout(false, n, m).unwrap();
                assert_eq!(layout, SubplotLayout { rows: 1, columns: 1 });
            }
        }
    }

    #[test]
    fn test_subplots_more_charts_than_columns() {
        let layout = get_subplot_layout(true, 10, 4).unwrap();
        assert_eq!(layout, SubplotLayout { rows: 3, columns: 4 });
    }

    #[test]
    fn test_subplots_exact_multiple() {
        assert_eq!(get_subplot_layout(true, 4, 4).unwrap(), SubplotLayout { rows: 1, columns: 4 });
        assert_eq!(get_subplot_layout(true, 8, 4).unwrap(), SubplotLayout { rows: 2, columns: 4 });
    }

    #[test]
    fn test_subplots_fewer_charts_than_columns() {
        let layout = get_subplot_layout(true, 3, 4).unwrap();
        assert_eq!(layout, SubplotLayout { rows: 1, columns: 3 });
        assert_eq!(layout.cells(), 3);
    }

    #[test]
    fn test_zero_inputs_are_rejected() {
        assert!(matches!(
            get_subplot_layout(true, 0, 4),
            Err(ChartError::InvalidLayout { n_charts: 0, max_cols: 4 })
        ));
        assert!(get_subplot_layout(false, 3, 0).is_err());
    }
}
