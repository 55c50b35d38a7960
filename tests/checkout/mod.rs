mod checkout_detached;
