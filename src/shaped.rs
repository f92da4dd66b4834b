/// A scalar, a flat sequence or a row-major grid of values.
///
/// Conversions map every element and keep the variant and the grid shape,
/// so a host gets back exactly the layout it passed in.
///
/// # Examples
///
/// ```rust
/// use caltick::Shaped;
///
/// let grid = Shaped::Grid { shape: vec![2, 2], data: vec![1, 2, 3, 4] };
/// let doubled = grid.map(|v| v * 2);
/// assert_eq!(doubled.shape(), vec![2, 2]);
/// assert_eq!(doubled.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6, 8]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Shaped<T> {
    Scalar(T),
    Sequence(Vec<T>),
    /// Elements in row-major order; `shape` multiplies out to `data.len()`.
    Grid { shape: Vec<usize>, data: Vec<T> },
}

impl<T> Shaped<T> {
    pub fn len(&self) -> usize {
        match self {
            Shaped::Scalar(_) => 1,
            Shaped::Sequence(v) => v.len(),
            Shaped::Grid { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensions: `[]` for a scalar, `[n]` for a sequence.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Shaped::Scalar(_) => Vec::new(),
            Shaped::Sequence(v) => vec![v.len()],
            Shaped::Grid { shape, .. } => shape.clone(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Shaped::Scalar(v) => std::slice::from_ref(v).iter(),
            Shaped::Sequence(v) => v.iter(),
            Shaped::Grid { data, .. } => data.iter(),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn map<U, F>(self, mut f: F) -> Shaped<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Shaped::Scalar(v) => Shaped::Scalar(f(v)),
            Shaped::Sequence(v) => Shaped::Sequence(v.into_iter().map(f).collect()),
            Shaped::Grid { shape, data } => Shaped::Grid {
                shape,
                data: data.into_iter().map(f).collect(),
            },
        }
    }

    /// Like [`Shaped::map`], stopping at the first error.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Shaped<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(match self {
            Shaped::Scalar(v) => Shaped::Scalar(f(v)?),
            Shaped::Sequence(v) => {
                Shaped::Sequence(v.into_iter().map(f).collect::<Result<_, E>>()?)
            }
            Shaped::Grid { shape, data } => Shaped::Grid {
                shape,
                data: data.into_iter().map(f).collect::<Result<_, E>>()?,
            },
        })
    }

    /// Borrowing form of [`Shaped::try_map`].
    pub fn try_map_ref<U, E, F>(&self, mut f: F) -> Result<Shaped<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        Ok(match self {
            Shaped::Scalar(v) => Shaped::Scalar(f(v)?),
            Shaped::Sequence(v) => Shaped::Sequence(v.iter().map(f).collect::<Result<_, E>>()?),
            Shaped::Grid { shape, data } => Shaped::Grid {
                shape: shape.clone(),
                data: data.iter().map(f).collect::<Result<_, E>>()?,
            },
        })
    }
}

impl<T> From<Vec<T>> for Shaped<T> {
    fn from(values: Vec<T>) -> Self {
        Shaped::Sequence(values)
    }
}

impl<'a, T> IntoIterator for &'a Shaped<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_variant() {
        assert_eq!(Shaped::Scalar(2).map(|v| v + 1), Shaped::Scalar(3));
        assert_eq!(
            Shaped::Sequence(vec![1, 2]).map(|v| v * 10),
            Shaped::Sequence(vec![10, 20])
        );
        let grid = Shaped::Grid {
            shape: vec![1, 3],
            data: vec![1, 2, 3],
        };
        assert_eq!(grid.map(|v| v as f64).shape(), vec![1, 3]);
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let mut seen = Vec::new();
        let result: Result<Shaped<i32>, String> =
            Shaped::Sequence(vec![1, -2, 3]).try_map(|v| {
                seen.push(v);
                if v < 0 {
                    Err(format!("negative {v}"))
                } else {
                    Ok(v)
                }
            });
        assert_eq!(result, Err("negative -2".to_string()));
        assert_eq!(seen, vec![1, -2]);
    }

    #[test]
    fn test_try_map_ref_keeps_grid_shape() {
        let grid = Shaped::Grid {
            shape: vec![2, 1],
            data: vec!["a", "bb"],
        };
        let lengths: Shaped<usize> = grid.try_map_ref(|s| Ok::<_, ()>(s.len())).unwrap();
        assert_eq!(
            lengths,
            Shaped::Grid {
                shape: vec![2, 1],
                data: vec![1, 2],
            }
        );
    }

    #[test]
    fn test_len_shape_and_first() {
        let scalar = Shaped::Scalar(7);
        assert_eq!((scalar.len(), scalar.shape()), (1, vec![]));
        assert_eq!(scalar.first(), Some(&7));

        let empty: Shaped<i32> = Shaped::Sequence(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
        assert_eq!(empty.shape(), vec![0]);
    }
}
