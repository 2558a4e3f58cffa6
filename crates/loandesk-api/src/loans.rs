// Loan endpoints: /loans and /loans/{id}

use crate::ApiClient;
use crate::error::Error;
use crate::types::{LoanFields, LoanRecord, RawId};

impl ApiClient {
    pub async fn list_loans(&self) -> Result<Vec<LoanRecord>, Error> {
        self.get(&["loans"]).await
    }

    pub async fn get_loan(&self, id: &RawId) -> Result<LoanRecord, Error> {
        self.get(&["loans", &id.to_string()]).await
    }

    pub async fn create_loan(&self, fields: &LoanFields) -> Result<LoanRecord, Error> {
        self.post(&["loans"], fields).await
    }

    pub async fn update_loan(&self, id: &RawId, fields: &LoanFields) -> Result<LoanRecord, Error> {
        self.put(&["loans", &id.to_string()], fields).await
    }

    pub async fn delete_loan(&self, id: &RawId) -> Result<(), Error> {
        self.delete(&["loans", &id.to_string()]).await
    }
}
