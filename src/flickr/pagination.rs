use super::RequestParams;

#[derive(Debug, Clone, Default)]
pub struct Pager {
    last: Option<(String, RequestParams)>,
}

impl Pager {
    pub fn record(&mut self, method: &str, params: &RequestParams) {
        self.last = Some((method.to_owned(), params.clone()));
    }

    pub fn last(&self) -> Option<(&str, &RequestParams)> {
        self.last.as_ref().map(|(method, params)| (method.as_str(), params))
    }

    pub fn next_page(&self) -> Option<(String, RequestParams)> {
        self.shifted(|page| page.checked_add(1).filter(|_| page > 0))
    }

    pub fn prev_page(&self) -> Option<(String, RequestParams)> {
        self.shifted(|page| (page > 1).then(|| page - 1))
    }

    fn shifted<F: FnOnce(i64) -> Option<i64>>(&self, shift: F) -> Option<(String, RequestParams)> {
        let (method, params) = self.last.as_ref()?;

        // No explicit page means the first one.
        let page = match params.get("page") {
            Some(_) => params.page()?,
            None => 1,
        };

        let mut params = params.clone();
        params.set_page(shift(page)?);

        Some((method.clone(), params))
    }
}
